//! Random value generator for sqlfuzz.
//!
//! [`DataGenerator`] turns a classified [`Field`](fuzz_core::Field) into one
//! random [`GeneratedValue`](fuzz_core::GeneratedValue). It owns a seeded
//! `StdRng`, so two generators built from the same seed produce the same
//! sequence of values for the same sequence of fields.
//!
//! # Architecture
//!
//! ```text
//! ColumnDescriptor
//!        │  Dialect::classify
//!        ▼
//!      Field { kind, length, enum_values }
//!        │
//!        ▼
//! ┌─────────────────┐
//! │  DataGenerator  │
//! │                 │
//! │  - seed         │
//! │  - rng (StdRng) │
//! │  - skipped      │
//! └────────┬────────┘
//!          │
//!          ▼
//!   Option<GeneratedValue>   (None for FieldKind::Unknown)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fuzz_core::{Field, FieldKind, GeneratedValue};
//! use fuzz_generator::DataGenerator;
//!
//! let mut generator = DataGenerator::new(42);
//! let value = generator.generate(&Field::with_length(FieldKind::String, 8));
//! match value {
//!     Some(GeneratedValue::Text(s)) => assert_eq!(s.len(), 8),
//!     other => panic!("unexpected value: {other:?}"),
//! }
//! ```
//!
//! # Value shapes
//!
//! - `String` - alphanumeric of the declared length (20 when undeclared), or a
//!   ULID when the column is wide enough to hold one
//! - `SmallInt` / `Int` - positive integers within the signed 16/32-bit range
//! - `Float` - integer with at most `length` digits
//! - `Blob` - base64 of 12 random bytes
//! - `Text` - 12 alphanumeric characters
//! - `Enum` - one of the declared literals
//! - `Bool` - fair coin
//! - `Json` - two-key object
//! - `Time` - second-precision date/time between 1970 and 2038
//! - `Year` - 1901 to 2155
//! - `Xml` - two `<record>` elements
//! - `Uuid` - RFC 4122 v4
//! - `BinaryString` - `0`/`1` characters, declared length or 8

pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use generator::DataGenerator;
pub use generators::generate_value;
