//! MySQL catalog queries.
//!
//! Columns come from `DESCRIBE`, which reports the full column type
//! (`varchar(30)`, `enum('a','b')`, `int(6) unsigned`) that the classifier
//! parses. Foreign keys come from `information_schema.KEY_COLUMN_USAGE`.

use crate::error::MySqlError;
use crate::insert::quote_identifier;
use fuzz_core::column::attach_foreign_keys;
use fuzz_core::{ColumnDescriptor, ForeignKeyRef};
use mysql_async::prelude::*;
use mysql_async::Conn;

/// One row of `DESCRIBE <table>`: Field, Type, Null, Key, Default, Extra.
type DescribeRow = (String, String, String, String, Option<String>, String);

/// Base tables of the current database, alphabetically.
pub async fn show_tables(conn: &mut Conn) -> Result<Vec<String>, MySqlError> {
    let query = "
        SELECT TABLE_NAME
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = DATABASE()
        AND TABLE_TYPE = 'BASE TABLE'
        ORDER BY TABLE_NAME
    ";

    let tables: Vec<String> = conn.query(query).await?;
    Ok(tables)
}

/// Columns of `table` in ordinal order, with outgoing foreign keys attached.
pub async fn describe_table(
    conn: &mut Conn,
    table: &str,
) -> Result<Vec<ColumnDescriptor>, MySqlError> {
    let rows: Vec<DescribeRow> = conn
        .query(format!("DESCRIBE {}", quote_identifier(table)))
        .await?;
    if rows.is_empty() {
        return Err(MySqlError::TableNotFound(table.to_string()));
    }

    let columns = rows.into_iter().map(column_from_row).collect();
    let foreign_keys = foreign_keys(conn, table).await?;
    Ok(attach_foreign_keys(columns, foreign_keys))
}

/// Outgoing foreign keys of `table`.
pub async fn foreign_keys(conn: &mut Conn, table: &str) -> Result<Vec<ForeignKeyRef>, MySqlError> {
    let query = "
        SELECT CONSTRAINT_NAME, TABLE_NAME, COLUMN_NAME,
               REFERENCED_TABLE_NAME, REFERENCED_COLUMN_NAME
        FROM information_schema.KEY_COLUMN_USAGE
        WHERE TABLE_SCHEMA = DATABASE()
        AND TABLE_NAME = ?
        AND REFERENCED_TABLE_NAME IS NOT NULL
        ORDER BY ORDINAL_POSITION
    ";

    let rows: Vec<(String, String, String, String, String)> = conn.exec(query, (table,)).await?;
    Ok(rows
        .into_iter()
        .map(
            |(constraint_name, table, column, referenced_table, referenced_column)| {
                ForeignKeyRef {
                    constraint_name,
                    table,
                    column,
                    referenced_table,
                    referenced_column,
                }
            },
        )
        .collect())
}

/// Tables with a foreign key pointing at `table`.
pub async fn referencing_tables(conn: &mut Conn, table: &str) -> Result<Vec<String>, MySqlError> {
    let query = "
        SELECT DISTINCT TABLE_NAME
        FROM information_schema.KEY_COLUMN_USAGE
        WHERE TABLE_SCHEMA = DATABASE()
        AND REFERENCED_TABLE_NAME = ?
        ORDER BY TABLE_NAME
    ";

    let tables: Vec<String> = conn.exec(query, (table,)).await?;
    Ok(tables)
}

fn column_from_row((name, raw_type, null, key, default, extra): DescribeRow) -> ColumnDescriptor {
    let mut column = ColumnDescriptor::new(name, raw_type)
        .with_key(key)
        .with_extra(extra);
    if null.eq_ignore_ascii_case("NO") {
        column = column.not_null();
    }
    if let Some(default) = default {
        column = column.with_default(default);
    }
    column
}
