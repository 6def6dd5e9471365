//! Column metadata read from the database catalog.

use serde::{Deserialize, Serialize};

/// One outgoing foreign key: `table.column -> referenced_table.referenced_column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub constraint_name: String,
    pub table: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl ForeignKeyRef {
    /// True when the key points back at the table that owns it.
    pub fn is_self_reference(&self) -> bool {
        self.table == self.referenced_table
    }
}

/// Everything the catalog reports about a single column.
///
/// Produced once per run by a dialect's `describe` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Type string exactly as the catalog reported it
    pub raw_type: String,
    pub nullable: bool,
    /// Key role (`PRI`, `UNI`, `MUL` on MySQL, empty otherwise)
    pub key: String,
    /// Declared character/bit length when the catalog reports one separately
    pub length: Option<u32>,
    /// Default expression, if any
    pub default: Option<String>,
    /// Extra attributes (`auto_increment`, `DEFAULT_GENERATED`, ...)
    pub extra: String,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub foreign_key: Option<ForeignKeyRef>,
}

impl ColumnDescriptor {
    /// A nullable column with no key role, default or foreign key.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: true,
            key: String::new(),
            length: None,
            default: None,
            extra: String::new(),
            precision: None,
            scale: None,
            foreign_key: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn with_numeric(mut self, precision: Option<u32>, scale: Option<u32>) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    pub fn with_foreign_key(mut self, foreign_key: ForeignKeyRef) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    /// Whether the database fills this column on its own.
    ///
    /// True iff a default expression is present and non-empty. Columns with a
    /// default never receive an explicit value from the insertion engine.
    pub fn has_default(&self) -> bool {
        self.default.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Attach foreign keys to the columns they belong to, matching by column name.
///
/// Both dialects issue one catalog query for columns and one for foreign keys;
/// this is the join. Keys naming a column that does not exist are dropped.
pub fn attach_foreign_keys(
    mut columns: Vec<ColumnDescriptor>,
    foreign_keys: Vec<ForeignKeyRef>,
) -> Vec<ColumnDescriptor> {
    for fk in foreign_keys {
        if let Some(column) = columns.iter_mut().find(|c| c.name == fk.column) {
            column.foreign_key = Some(fk);
        }
    }
    columns
}
