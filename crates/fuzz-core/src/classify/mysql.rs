//! MySQL rule table.
//!
//! Input is the `Type` column of `DESCRIBE <table>`, e.g. `varchar(30)`,
//! `int(6) unsigned`, `decimal(12,4)`, `enum('a','b')`.

use super::{literal_values, type_args, TypeArgs};
use crate::{Field, FieldKind};

#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Needs exactly one length argument
    Sized(FieldKind),
    /// `(precision[, scale])`; length becomes `precision - scale`
    FixedPoint,
    /// Quoted literal list
    Literals,
    /// No arguments of interest
    Plain(FieldKind),
    Year,
}

// Order matters: a prefix must come before any shorter prefix it starts with.
const RULES: &[(&str, Rule)] = &[
    // String types
    ("varbinary", Rule::Sized(FieldKind::String)),
    ("varchar", Rule::Sized(FieldKind::String)),
    ("binary", Rule::Sized(FieldKind::String)),
    ("char", Rule::Sized(FieldKind::String)),
    // Integer types
    ("tinyint", Rule::Plain(FieldKind::Bool)),
    ("boolean", Rule::Plain(FieldKind::Bool)),
    ("bool", Rule::Plain(FieldKind::Bool)),
    ("mediumint", Rule::Plain(FieldKind::SmallInt)),
    ("smallint", Rule::Plain(FieldKind::SmallInt)),
    ("bigint", Rule::Plain(FieldKind::Int)),
    ("integer", Rule::Plain(FieldKind::Int)),
    ("int", Rule::Plain(FieldKind::Int)),
    // Fixed-point and floating-point
    ("decimal", Rule::FixedPoint),
    ("numeric", Rule::FixedPoint),
    ("double", Rule::FixedPoint),
    ("float", Rule::FixedPoint),
    // Blob
    ("mediumblob", Rule::Plain(FieldKind::Blob)),
    ("tinyblob", Rule::Plain(FieldKind::Blob)),
    ("longblob", Rule::Plain(FieldKind::Blob)),
    ("blob", Rule::Plain(FieldKind::Blob)),
    // Text
    ("mediumtext", Rule::Plain(FieldKind::Text)),
    ("tinytext", Rule::Plain(FieldKind::Text)),
    ("longtext", Rule::Plain(FieldKind::Text)),
    ("text", Rule::Plain(FieldKind::Text)),
    ("json", Rule::Plain(FieldKind::Json)),
    ("year", Rule::Year),
    // Temporal
    ("datetime", Rule::Plain(FieldKind::Time)),
    ("timestamp", Rule::Plain(FieldKind::Time)),
    ("date", Rule::Plain(FieldKind::Time)),
    ("time", Rule::Plain(FieldKind::Time)),
    // Literal sets
    ("enum", Rule::Literals),
    ("set", Rule::Literals),
];

/// Classify a MySQL column type string.
pub fn classify_mysql(raw_type: &str) -> Field {
    let trimmed = raw_type.trim();
    let lower = trimmed.to_ascii_lowercase();

    let Some((_, rule)) = RULES.iter().find(|(prefix, _)| lower.starts_with(prefix)) else {
        return Field::unknown();
    };

    match *rule {
        Rule::Sized(kind) => match type_args(&lower) {
            TypeArgs::Parsed(args) if args.len() == 1 => Field::with_length(kind, args[0]),
            _ => Field::unknown(),
        },
        Rule::FixedPoint => match type_args(&lower) {
            TypeArgs::Absent => Field::new(FieldKind::Float),
            TypeArgs::Parsed(args) => match args.as_slice() {
                [precision] => Field::with_length(FieldKind::Float, *precision),
                [precision, scale] if precision >= scale => {
                    Field::with_length(FieldKind::Float, precision - scale)
                }
                _ => Field::unknown(),
            },
            TypeArgs::Malformed => Field::unknown(),
        },
        // Slice the original string so literal values keep their case.
        Rule::Literals => match literal_values(trimmed) {
            Some(values) => Field::enumeration(values),
            None => Field::unknown(),
        },
        Rule::Plain(kind) => Field::new(kind),
        Rule::Year => Field::with_length(FieldKind::Year, 4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_field(raw: &str, kind: FieldKind, length: Option<u32>) {
        let field = classify_mysql(raw);
        assert_eq!(field.kind, kind, "kind of {raw}");
        assert_eq!(field.length, length, "length of {raw}");
    }

    #[test]
    fn test_string_types() {
        assert_field("varchar(12)", FieldKind::String, Some(12));
        assert_field("varchar(42)", FieldKind::String, Some(42));
        assert_field("char(100)", FieldKind::String, Some(100));
        assert_field("varbinary(100)", FieldKind::String, Some(100));
        assert_field("binary(100)", FieldKind::String, Some(100));
        assert_field("VARCHAR(30)", FieldKind::String, Some(30));
    }

    #[test]
    fn test_string_types_without_length_are_unknown() {
        assert_field("varchar", FieldKind::Unknown, None);
        assert_field("char(x)", FieldKind::Unknown, None);
        assert_field("varchar(10,2)", FieldKind::Unknown, None);
    }

    #[test]
    fn test_integer_types() {
        assert_field("tinyint", FieldKind::Bool, None);
        assert_field("tinyint(1)", FieldKind::Bool, None);
        assert_field("smallint", FieldKind::SmallInt, None);
        assert_field("mediumint", FieldKind::SmallInt, None);
        assert_field("int", FieldKind::Int, None);
        assert_field("int(6) unsigned", FieldKind::Int, None);
        assert_field("integer", FieldKind::Int, None);
        assert_field("bigint", FieldKind::Int, None);
    }

    #[test]
    fn test_fixed_point_types() {
        assert_field("decimal(12, 4)", FieldKind::Float, Some(8));
        assert_field("decimal(12,4)", FieldKind::Float, Some(8));
        assert_field("decimal(10,2) unsigned", FieldKind::Float, Some(8));
        assert_field("float(12,4)", FieldKind::Float, Some(8));
        assert_field("double(23,3)", FieldKind::Float, Some(20));
        assert_field("decimal(5)", FieldKind::Float, Some(5));
        assert_field("double", FieldKind::Float, None);
        assert_field("float", FieldKind::Float, None);
    }

    #[test]
    fn test_fixed_point_precision_below_scale_is_unknown() {
        assert_field("decimal(2,4)", FieldKind::Unknown, None);
        assert_field("decimal(a,b)", FieldKind::Unknown, None);
        assert_field("decimal(1,2,3)", FieldKind::Unknown, None);
    }

    #[test]
    fn test_blob_text_json() {
        for raw in ["blob", "tinyblob", "mediumblob", "longblob"] {
            assert_field(raw, FieldKind::Blob, None);
        }
        for raw in ["text", "tinytext", "mediumtext", "longtext"] {
            assert_field(raw, FieldKind::Text, None);
        }
        assert_field("json", FieldKind::Json, None);
    }

    #[test]
    fn test_temporal_types() {
        for raw in ["datetime", "date", "timestamp", "time", "timestamp(6)"] {
            assert_field(raw, FieldKind::Time, None);
        }
        assert_field("year", FieldKind::Year, Some(4));
        assert_field("year(4)", FieldKind::Year, Some(4));
    }

    #[test]
    fn test_enum_values_in_declaration_order() {
        let field = classify_mysql("enum('a','b','c')");
        assert_eq!(field.kind, FieldKind::Enum);
        assert_eq!(field.enum_values, vec!["a", "b", "c"]);

        let field = classify_mysql("enum('Small', 'Medium', 'Large')");
        assert_eq!(field.enum_values, vec!["Small", "Medium", "Large"]);

        let field = classify_mysql("set('x','y')");
        assert_eq!(field.kind, FieldKind::Enum);
        assert_eq!(field.enum_values, vec!["x", "y"]);
    }

    #[test]
    fn test_empty_enum_is_unknown() {
        assert_field("enum()", FieldKind::Unknown, None);
    }

    #[test]
    fn test_unrecognised_types() {
        for raw in ["geometry", "point", "bit(8)", "", "   ", "(", ")", "))((", "ínt"] {
            assert_field(raw, FieldKind::Unknown, None);
        }
    }

    #[test]
    fn test_classification_is_idempotent() {
        for raw in ["varchar(42)", "decimal(12,4)", "enum('a','b','c')", "whatever"] {
            assert_eq!(classify_mysql(raw), classify_mysql(raw));
        }
    }
}
