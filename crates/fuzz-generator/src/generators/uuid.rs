//! `uuid` columns.

use fuzz_core::GeneratedValue;
use rand::Rng;
use uuid::Builder;

/// Version 4 UUID drawn from `rng`, in hyphenated text form so both dialects
/// accept it as a literal.
pub fn random_uuid<R: Rng>(rng: &mut R) -> GeneratedValue {
    let uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
    GeneratedValue::Text(uuid.hyphenated().to_string())
}
