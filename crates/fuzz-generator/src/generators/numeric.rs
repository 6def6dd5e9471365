//! Numeric value generators.

use fuzz_core::GeneratedValue;
use rand::Rng;

pub const SMALL_INT_MAX: i64 = 32766;
pub const INT_MAX: i64 = 2_147_483_647;

// 10^18 - 1 is the widest bound that fits an i64.
const MAX_DIGITS: u32 = 18;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> GeneratedValue {
    GeneratedValue::Int(rng.gen_range(min..=max))
}

/// Generate an integer with at most `digits` digits.
///
/// With no digit count the value falls in `[1, 2147483647]`. Zero integer
/// digits (`decimal(4,4)`) only admits `0`.
pub fn generate_bounded_number<R: Rng>(rng: &mut R, digits: Option<u32>) -> GeneratedValue {
    match digits {
        None => generate_int_range(rng, 1, INT_MAX),
        Some(0) => GeneratedValue::Int(0),
        Some(digits) => {
            let max = 10i64.pow(digits.min(MAX_DIGITS)) - 1;
            generate_int_range(rng, 1, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn int(value: GeneratedValue) -> i64 {
        match value {
            GeneratedValue::Int(v) => v,
            other => panic!("Expected Int value, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_int_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let v = int(generate_int_range(&mut rng, 1, SMALL_INT_MAX));
            assert!((1..=SMALL_INT_MAX).contains(&v));
        }
    }

    #[test]
    fn test_bounded_number_fits_digits() {
        let mut rng = StdRng::seed_from_u64(42);
        for digits in 1..=8 {
            for _ in 0..50 {
                let v = int(generate_bounded_number(&mut rng, Some(digits)));
                assert!(v >= 1 && v.to_string().len() <= digits as usize);
            }
        }
    }

    #[test]
    fn test_bounded_number_edges() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(int(generate_bounded_number(&mut rng, Some(0))), 0);

        let v = int(generate_bounded_number(&mut rng, Some(40)));
        assert!(v.to_string().len() <= 18);

        let v = int(generate_bounded_number(&mut rng, None));
        assert!((1..=INT_MAX).contains(&v));
    }
}
