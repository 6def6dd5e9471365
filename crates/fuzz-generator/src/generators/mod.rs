//! Individual value generators for each field kind.

pub mod numeric;
pub mod string;
pub mod structured;
pub mod timestamp;
pub mod uuid;

use fuzz_core::{Field, FieldKind, GeneratedValue};
use rand::Rng;

/// Generate one value for `field`.
///
/// Returns `None` only for [`FieldKind::Unknown`] (and an enum with no
/// literals, which classification never produces).
pub fn generate_value<R: Rng>(field: &Field, rng: &mut R) -> Option<GeneratedValue> {
    let value = match field.kind {
        FieldKind::String => string::generate_string(rng, field.length),
        FieldKind::SmallInt => numeric::generate_int_range(rng, 1, numeric::SMALL_INT_MAX),
        FieldKind::Int => numeric::generate_int_range(rng, 1, numeric::INT_MAX),
        FieldKind::Float => numeric::generate_bounded_number(rng, field.length),
        FieldKind::Blob => string::generate_blob(rng),
        FieldKind::Text => {
            GeneratedValue::Text(string::random_alphanumeric(rng, string::TEXT_LENGTH))
        }
        FieldKind::Enum => {
            if field.enum_values.is_empty() {
                return None;
            }
            let idx = rng.gen_range(0..field.enum_values.len());
            GeneratedValue::Text(field.enum_values[idx].clone())
        }
        FieldKind::Bool => GeneratedValue::Bool(rng.gen_bool(0.5)),
        FieldKind::Json => structured::generate_json(rng),
        FieldKind::Time => timestamp::generate_datetime(rng),
        FieldKind::Year => numeric::generate_int_range(rng, 1901, 2155),
        FieldKind::Xml => structured::generate_xml(rng),
        FieldKind::Uuid => uuid::random_uuid(rng),
        FieldKind::BinaryString => string::generate_bit_string(rng, field.length),
        FieldKind::Unknown => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_unknown_has_no_value() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_value(&Field::unknown(), &mut rng), None);
    }

    #[test]
    fn test_enum_picks_declared_literal() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = Field::enumeration(vec!["a".into(), "b".into(), "c".into()]);
        for _ in 0..50 {
            match generate_value(&field, &mut rng) {
                Some(GeneratedValue::Text(s)) => assert!(["a", "b", "c"].contains(&s.as_str())),
                other => panic!("Expected Text value, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_enum_has_no_value() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generate_value(&Field::enumeration(vec![]), &mut rng), None);
    }

    #[test]
    fn test_bool_takes_both_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = Field::new(FieldKind::Bool);
        let values: Vec<_> = (0..100)
            .filter_map(|_| generate_value(&field, &mut rng))
            .collect();
        assert!(values.contains(&GeneratedValue::Bool(true)));
        assert!(values.contains(&GeneratedValue::Bool(false)));
    }

    #[test]
    fn test_year_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = Field::with_length(FieldKind::Year, 4);
        for _ in 0..200 {
            match generate_value(&field, &mut rng) {
                Some(GeneratedValue::Int(y)) => assert!((1901..=2155).contains(&y)),
                other => panic!("Expected Int value, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_every_known_kind_produces_a_value() {
        let mut rng = StdRng::seed_from_u64(7);
        let fields = [
            Field::with_length(FieldKind::String, 10),
            Field::new(FieldKind::SmallInt),
            Field::new(FieldKind::Int),
            Field::with_length(FieldKind::Float, 8),
            Field::new(FieldKind::Blob),
            Field::new(FieldKind::Text),
            Field::enumeration(vec!["x".into()]),
            Field::new(FieldKind::Bool),
            Field::new(FieldKind::Json),
            Field::new(FieldKind::Time),
            Field::with_length(FieldKind::Year, 4),
            Field::new(FieldKind::Xml),
            Field::new(FieldKind::Uuid),
            Field::with_length(FieldKind::BinaryString, 4),
        ];
        for field in &fields {
            let value = generate_value(field, &mut rng);
            assert!(
                matches!(value, Some(ref v) if !v.is_null()),
                "{} produced {value:?}",
                field.kind
            );
        }
    }
}
