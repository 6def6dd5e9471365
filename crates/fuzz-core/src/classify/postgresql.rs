//! PostgreSQL rule table.
//!
//! Input is `information_schema.columns.data_type` plus the separately
//! reported `character_maximum_length`, `numeric_precision` and
//! `numeric_scale`, all carried on the [`ColumnDescriptor`].

use crate::{ColumnDescriptor, Field, FieldKind};

#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Character data, length from `character_maximum_length`
    Chars,
    /// Bit strings, length from `character_maximum_length`
    Bits,
    /// `numeric(p, s)`; length becomes `p - s` when both are known
    Numeric,
    Plain(FieldKind),
}

// Order matters: a prefix must come before any shorter prefix it starts with.
const RULES: &[(&str, Rule)] = &[
    ("bigint", Rule::Plain(FieldKind::Int)),
    ("integer", Rule::Plain(FieldKind::Int)),
    ("smallint", Rule::Plain(FieldKind::SmallInt)),
    ("bit varying", Rule::Bits),
    ("bit", Rule::Bits),
    ("bytea", Rule::Bits),
    ("character varying", Rule::Chars),
    ("character", Rule::Chars),
    ("double precision", Rule::Plain(FieldKind::Float)),
    ("real", Rule::Plain(FieldKind::Float)),
    ("numeric", Rule::Numeric),
    ("decimal", Rule::Numeric),
    ("boolean", Rule::Plain(FieldKind::Bool)),
    ("jsonb", Rule::Plain(FieldKind::Json)),
    ("json", Rule::Plain(FieldKind::Json)),
    ("text", Rule::Plain(FieldKind::Text)),
    ("timestamp", Rule::Plain(FieldKind::Time)),
    ("time", Rule::Plain(FieldKind::Time)),
    ("date", Rule::Plain(FieldKind::Time)),
    ("xml", Rule::Plain(FieldKind::Xml)),
    ("uuid", Rule::Plain(FieldKind::Uuid)),
];

/// Classify a PostgreSQL column.
pub fn classify_postgres(column: &ColumnDescriptor) -> Field {
    let lower = column.raw_type.trim().to_ascii_lowercase();

    let Some((_, rule)) = RULES.iter().find(|(prefix, _)| lower.starts_with(prefix)) else {
        return Field::unknown();
    };

    match *rule {
        Rule::Chars => match column.length {
            Some(length) if length > 0 => Field::with_length(FieldKind::String, length),
            _ => Field::new(FieldKind::String),
        },
        Rule::Bits => match column.length {
            Some(length) => Field::with_length(FieldKind::BinaryString, length),
            None => Field::new(FieldKind::BinaryString),
        },
        Rule::Numeric => match (column.precision, column.scale) {
            (Some(precision), Some(scale)) if precision < scale => Field::unknown(),
            (Some(precision), Some(scale)) => Field::with_length(FieldKind::Float, precision - scale),
            _ => Field::new(FieldKind::Float),
        },
        Rule::Plain(kind) => Field::new(kind),
    }
}
