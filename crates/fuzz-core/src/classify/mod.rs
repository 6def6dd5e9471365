//! Column type classification.
//!
//! Each dialect owns an ordered rule table of case-insensitive prefixes. The
//! first matching prefix wins, so longer and more specific prefixes are listed
//! before the shorter ones they start with. Classification never fails: a type
//! no rule matches, or one whose arguments do not parse, becomes
//! [`FieldKind::Unknown`](crate::FieldKind::Unknown).

mod mysql;
mod postgresql;

use crate::{ColumnDescriptor, Field};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use mysql::classify_mysql;
pub use postgresql::classify_postgres;

/// Supported database dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    MySql,
    Postgres,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }

    /// Classify a column using this dialect's rule table.
    pub fn classify(&self, column: &ColumnDescriptor) -> Field {
        match self {
            Self::MySql => classify_mysql(&column.raw_type),
            Self::Postgres => classify_postgres(column),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parenthesised numeric arguments of a type string, e.g. `(12, 4)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeArgs {
    Absent,
    Parsed(Vec<u32>),
    Malformed,
}

/// Extract the numeric arguments between the first `(` and the following `)`.
///
/// Anything after the closing parenthesis (`unsigned`, `zerofill`) is ignored.
pub(crate) fn type_args(raw: &str) -> TypeArgs {
    let Some(open) = raw.find('(') else {
        return if raw.contains(')') {
            TypeArgs::Malformed
        } else {
            TypeArgs::Absent
        };
    };
    let Some(close) = raw[open..].find(')').map(|i| open + i) else {
        return TypeArgs::Malformed;
    };

    let inner = &raw[open + 1..close];
    let mut args = Vec::new();
    for part in inner.split(',') {
        match part.trim().parse::<u32>() {
            Ok(n) => args.push(n),
            Err(_) => return TypeArgs::Malformed,
        }
    }
    TypeArgs::Parsed(args)
}

/// Split the quoted literal list of `enum('a','b')` / `set('a','b')`.
///
/// Values keep their original case and declaration order. A doubled quote
/// inside a literal is an escaped quote. Returns `None` when there is no
/// parenthesised list, a quote is left open, or the list is empty.
pub(crate) fn literal_values(raw: &str) -> Option<Vec<String>> {
    let open = raw.find('(')?;
    let close = raw.rfind(')')?;
    if close <= open {
        return None;
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quote = '\'';
    let mut chars = raw[open + 1..close].chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == quote {
                if chars.peek() == Some(&quote) {
                    current.push(quote);
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '\'' | '"' => {
                    in_quotes = true;
                    quote = c;
                }
                ',' => {
                    values.push(std::mem::take(&mut current));
                }
                c if c.is_whitespace() => {}
                c => current.push(c),
            }
        }
    }
    if in_quotes {
        return None;
    }
    values.push(current);

    if values.iter().all(|v| v.is_empty()) {
        None
    } else {
        Some(values)
    }
}
