//! Date/time value generator.

use chrono::DateTime;
use fuzz_core::GeneratedValue;
use rand::Rng;

/// Last second representable by a signed 32-bit Unix timestamp (2038-01-19).
const MAX_TIMESTAMP: i64 = i32::MAX as i64;

/// Generate a second-precision date/time between 1970 and 2038.
///
/// The range keeps values valid for MySQL `TIMESTAMP` columns.
pub fn generate_datetime<R: Rng>(rng: &mut R) -> GeneratedValue {
    let secs = rng.gen_range(1..=MAX_TIMESTAMP);
    let dt = DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .unwrap_or_default();
    GeneratedValue::DateTime(dt)
}
