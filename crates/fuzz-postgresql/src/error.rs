//! Error types for the PostgreSQL driver.

use thiserror::Error;

/// Errors that can occur talking to PostgreSQL.
#[derive(Error, Debug)]
pub enum PostgresError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// The table has no columns in the current schema.
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// A value count did not match the column count of an INSERT.
    #[error("Expected {expected} values, got {actual}")]
    ValueCount { expected: usize, actual: usize },
}
