//! Values produced for a single column of a single row.

use chrono::NaiveDateTime;
use std::fmt::Write;

/// A generated (or looked-up) column value, before dialect-specific binding.
///
/// Each dialect crate converts this into its own parameter type.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    DateTime(NaiveDateTime),
}

impl GeneratedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render the value in the textual input syntax both dialects accept.
    ///
    /// Returns `None` for [`GeneratedValue::Null`].
    pub fn to_sql_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(b.to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Bytes(bytes) => {
                // bytea hex input format
                let mut out = String::with_capacity(2 + bytes.len() * 2);
                out.push_str("\\x");
                for b in bytes {
                    let _ = write!(out, "{b:02x}");
                }
                Some(out)
            }
            Self::Json(value) => Some(value.to_string()),
            Self::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}
