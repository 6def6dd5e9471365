//! Insertion engine.
//!
//! Builds one row per call: columns with a database default are left out,
//! foreign-key columns take a value already present in the referenced table,
//! every other column gets a generated value. Values written in this run are
//! remembered per `(table, column)` so later rows can reference them without a
//! round trip.

use async_trait::async_trait;
use fuzz_core::{ColumnDescriptor, Dialect, ForeignKeyRef, GeneratedValue, InsertionPlan, TableGraph};
use fuzz_generator::DataGenerator;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Statement execution needed by the insertion engine.
#[async_trait]
pub trait Executor: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert one row; `values[i]` is bound to `columns[i]`.
    async fn insert(
        &mut self,
        table: &str,
        columns: &[&ColumnDescriptor],
        values: Vec<GeneratedValue>,
    ) -> Result<(), Self::Error>;

    /// Greatest non-null value stored in `table.column`, if any.
    async fn latest_column_value(
        &mut self,
        table: &str,
        column: &str,
    ) -> Result<Option<GeneratedValue>, Self::Error>;
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A row could not be inserted.
#[derive(Debug, Error)]
pub enum InsertError {
    #[error("table '{0}' is not part of the resolved schema")]
    UnknownTable(String),

    #[error(
        "no value available for {}.{} (references {}.{})",
        .0.table, .0.column, .0.referenced_table, .0.referenced_column
    )]
    MissingReferencedValue(ForeignKeyRef),

    #[error("looking up {table}.{column} failed: {source}")]
    Lookup {
        table: String,
        column: String,
        #[source]
        source: BoxError,
    },

    #[error("insert into '{table}' failed: {source}")]
    Execute {
        table: String,
        #[source]
        source: BoxError,
    },
}

/// Shared by every worker of a run.
pub struct InsertionEngine {
    dialect: Dialect,
    /// Most recent value written per `(table, column)`
    latest: Mutex<HashMap<(String, String), GeneratedValue>>,
}

impl InsertionEngine {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Value most recently written to `table.column` in this run.
    pub fn latest_value(&self, table: &str, column: &str) -> Option<GeneratedValue> {
        let latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        latest
            .get(&(table.to_string(), column.to_string()))
            .cloned()
    }

    fn remember(&self, table: &str, columns: &[&ColumnDescriptor], values: &[GeneratedValue]) {
        let mut latest = self.latest.lock().unwrap_or_else(|e| e.into_inner());
        for (column, value) in columns.iter().zip(values) {
            if !value.is_null() {
                latest.insert((table.to_string(), column.name.clone()), value.clone());
            }
        }
    }

    /// Insert one row into `table`.
    pub async fn insert_row<E: Executor>(
        &self,
        executor: &mut E,
        generator: &mut DataGenerator,
        table: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<(), InsertError> {
        let mut bound: Vec<&ColumnDescriptor> = Vec::with_capacity(columns.len());
        let mut values: Vec<GeneratedValue> = Vec::with_capacity(columns.len());

        for column in columns.iter().filter(|c| !c.has_default()) {
            let value = match &column.foreign_key {
                Some(fk) => Some(self.referenced_value(executor, column, fk).await?),
                None => generator.generate_column(self.dialect, table, column),
            };
            if let Some(value) = value {
                bound.push(column);
                values.push(value);
            }
        }

        executor
            .insert(table, &bound, values.clone())
            .await
            .map_err(|e| InsertError::Execute {
                table: table.to_string(),
                source: Box::new(e),
            })?;

        debug!("Inserted row into {table} ({} columns)", bound.len());
        self.remember(table, &bound, &values);
        Ok(())
    }

    /// Insert one row into every table of `plan`, in plan order.
    ///
    /// Stops at the first failing table; rows already inserted stay.
    pub async fn insert_multi<E: Executor>(
        &self,
        executor: &mut E,
        generator: &mut DataGenerator,
        plan: &InsertionPlan,
        graph: &TableGraph,
    ) -> Result<(), InsertError> {
        for table in plan.iter() {
            let columns = graph
                .columns(table)
                .ok_or_else(|| InsertError::UnknownTable(table.to_string()))?;
            self.insert_row(executor, generator, table, columns).await?;
        }
        Ok(())
    }

    /// Value for a foreign-key column.
    ///
    /// Prefers the value this run last wrote to the referenced column, then
    /// whatever the referenced table already holds. A nullable column with
    /// nothing to point at gets NULL.
    async fn referenced_value<E: Executor>(
        &self,
        executor: &mut E,
        column: &ColumnDescriptor,
        fk: &ForeignKeyRef,
    ) -> Result<GeneratedValue, InsertError> {
        if let Some(value) = self.latest_value(&fk.referenced_table, &fk.referenced_column) {
            return Ok(value);
        }

        let stored = executor
            .latest_column_value(&fk.referenced_table, &fk.referenced_column)
            .await
            .map_err(|e| InsertError::Lookup {
                table: fk.referenced_table.clone(),
                column: fk.referenced_column.clone(),
                source: Box::new(e),
            })?;

        match stored {
            Some(value) => Ok(value),
            None if column.nullable => Ok(GeneratedValue::Null),
            None => Err(InsertError::MissingReferencedValue(fk.clone())),
        }
    }
}
