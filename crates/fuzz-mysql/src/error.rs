//! Error types for the MySQL driver.

use thiserror::Error;

/// Errors that can occur talking to MySQL.
#[derive(Error, Debug)]
pub enum MySqlError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// The table has no columns visible to the current user.
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
