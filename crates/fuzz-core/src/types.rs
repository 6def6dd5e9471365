//! Canonical field kinds.
//!
//! `FieldKind` is the closed set of shapes the data generator knows how to
//! produce. Every raw database type string maps to exactly one kind; anything
//! the rule tables do not recognise becomes [`FieldKind::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dialect-independent classification of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Bounded character data (`varchar(n)`, `char(n)`, `character varying`)
    String,
    /// Narrow integers (`smallint`, `mediumint`)
    SmallInt,
    /// Wide integers (`int`, `integer`, `bigint`)
    Int,
    /// Fixed-point and floating-point numerics
    Float,
    /// Binary large objects
    Blob,
    /// Unbounded character data
    Text,
    /// Closed set of literal values
    Enum,
    /// Boolean-like columns (`tinyint`, `boolean`)
    Bool,
    /// JSON documents
    Json,
    /// Dates, times and timestamps
    Time,
    /// MySQL `YEAR`
    Year,
    /// XML documents
    Xml,
    /// UUIDs
    Uuid,
    /// Bit strings written as `'0'`/`'1'` characters
    BinaryString,
    /// Anything the rule tables do not recognise
    Unknown,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::SmallInt => "small_int",
            Self::Int => "int",
            Self::Float => "float",
            Self::Blob => "blob",
            Self::Text => "text",
            Self::Enum => "enum",
            Self::Bool => "bool",
            Self::Json => "json",
            Self::Time => "time",
            Self::Year => "year",
            Self::Xml => "xml",
            Self::Uuid => "uuid",
            Self::BinaryString => "binary_string",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Result of classifying one column.
///
/// `length` is `None` when the type carries no usable length (the "not
/// applicable / parse failed" case). For [`FieldKind::Float`] it holds the
/// number of integer digits (`precision - scale`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub kind: FieldKind,
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl Field {
    /// A field of the given kind without length information.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            length: None,
            enum_values: Vec::new(),
        }
    }

    /// A field of the given kind with a declared length.
    pub fn with_length(kind: FieldKind, length: u32) -> Self {
        Self {
            kind,
            length: Some(length),
            enum_values: Vec::new(),
        }
    }

    /// An enumeration over the given literal values, in declaration order.
    pub fn enumeration(values: Vec<String>) -> Self {
        Self {
            kind: FieldKind::Enum,
            length: None,
            enum_values: values,
        }
    }

    /// The fallback for unrecognised or malformed types.
    pub fn unknown() -> Self {
        Self::new(FieldKind::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == FieldKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_has_no_length() {
        let field = Field::unknown();
        assert!(field.is_unknown());
        assert_eq!(field.length, None);
        assert!(field.enum_values.is_empty());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::BinaryString.to_string(), "binary_string");
        assert_eq!(FieldKind::SmallInt.to_string(), "small_int");
    }

    #[test]
    fn test_field_serialization_skips_empty_enum() {
        let json = serde_json::to_string(&Field::with_length(FieldKind::String, 42)).unwrap();
        assert_eq!(json, r#"{"kind":"string","length":42}"#);
    }
}
