//! Character and byte string generators.

use base64::{engine::general_purpose::STANDARD, Engine};
use fuzz_core::GeneratedValue;
use rand::distributions::Alphanumeric;
use rand::Rng;
use ulid::Ulid;

/// Length used when a string column declares none.
pub const DEFAULT_STRING_LENGTH: usize = 20;

/// Length of generated `Text` values.
pub const TEXT_LENGTH: usize = 12;

/// Columns wider than this get a ULID (26 characters) instead of random text.
pub const ULID_THRESHOLD: u32 = 25;

/// Bit length used when a bit string column declares none.
pub const DEFAULT_BIT_LENGTH: usize = 8;

const BLOB_BYTES: usize = 12;

/// Generate a value for a bounded character column.
pub fn generate_string<R: Rng>(rng: &mut R, length: Option<u32>) -> GeneratedValue {
    match length {
        Some(length) if length > ULID_THRESHOLD => GeneratedValue::Text(generate_ulid(rng)),
        Some(length) => GeneratedValue::Text(random_alphanumeric(rng, length as usize)),
        None => GeneratedValue::Text(random_alphanumeric(rng, DEFAULT_STRING_LENGTH)),
    }
}

/// A ULID drawn entirely from `rng`, so it is reproducible under a fixed seed.
pub fn generate_ulid<R: Rng>(rng: &mut R) -> String {
    let timestamp_ms = rng.gen_range(0..(1u64 << 48));
    Ulid::from_parts(timestamp_ms, rng.gen::<u128>()).to_string()
}

/// Random `[A-Za-z0-9]` string of exactly `len` characters.
pub fn random_alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Base64 of 12 random bytes.
pub fn generate_blob<R: Rng>(rng: &mut R) -> GeneratedValue {
    let mut bytes = [0u8; BLOB_BYTES];
    rng.fill(&mut bytes);
    GeneratedValue::Text(STANDARD.encode(bytes))
}

/// `0`/`1` string of the declared bit length.
pub fn generate_bit_string<R: Rng>(rng: &mut R, length: Option<u32>) -> GeneratedValue {
    let len = length.map_or(DEFAULT_BIT_LENGTH, |l| l as usize);
    let bits = (0..len)
        .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
        .collect();
    GeneratedValue::Text(bits)
}
