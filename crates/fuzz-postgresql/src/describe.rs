//! PostgreSQL catalog queries.
//!
//! Tables and columns are looked up in `current_schema()`. Column types come
//! from `information_schema.columns`, which reports lengths and numeric
//! precision separately from `data_type`. Foreign keys come from
//! `pg_constraint` so composite keys pair each column with its target.

use crate::error::PostgresError;
use fuzz_core::column::attach_foreign_keys;
use fuzz_core::{ColumnDescriptor, ForeignKeyRef};
use tokio_postgres::{Client, Row};

/// Tables of the current schema, alphabetically.
pub async fn show_tables(client: &Client) -> Result<Vec<String>, PostgresError> {
    let query = "
        SELECT tablename::text
        FROM pg_tables
        WHERE schemaname = current_schema()
        ORDER BY tablename
    ";

    let rows = client.query(query, &[]).await?;
    Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
}

/// Columns of `table` in ordinal order, with outgoing foreign keys attached.
pub async fn describe_table(
    client: &Client,
    table: &str,
) -> Result<Vec<ColumnDescriptor>, PostgresError> {
    let query = "
        SELECT column_name::text, data_type::text, character_maximum_length::int,
               column_default::text, is_nullable::text,
               numeric_precision::int, numeric_scale::int
        FROM information_schema.columns
        WHERE table_schema = current_schema()
        AND table_name::text = $1
        ORDER BY ordinal_position
    ";

    let rows = client.query(query, &[&table]).await?;
    if rows.is_empty() {
        return Err(PostgresError::TableNotFound(table.to_string()));
    }

    let columns = rows.iter().map(column_from_row).collect();
    let foreign_keys = foreign_keys(client, table).await?;
    Ok(attach_foreign_keys(columns, foreign_keys))
}

/// Outgoing foreign keys of `table`, one entry per constrained column.
pub async fn foreign_keys(
    client: &Client,
    table: &str,
) -> Result<Vec<ForeignKeyRef>, PostgresError> {
    let query = "
        SELECT con.conname::text, cl.relname::text, att.attname::text,
               ref.relname::text, ref_att.attname::text
        FROM pg_constraint con
        JOIN pg_class cl ON cl.oid = con.conrelid
        JOIN pg_namespace ns ON ns.oid = cl.relnamespace
        JOIN pg_class ref ON ref.oid = con.confrelid
        CROSS JOIN LATERAL unnest(con.conkey, con.confkey) AS k(attnum, ref_attnum)
        JOIN pg_attribute att ON att.attrelid = con.conrelid AND att.attnum = k.attnum
        JOIN pg_attribute ref_att ON ref_att.attrelid = con.confrelid
                                 AND ref_att.attnum = k.ref_attnum
        WHERE con.contype = 'f'
        AND ns.nspname = current_schema()
        AND cl.relname::text = $1
        ORDER BY con.conname, att.attnum
    ";

    let rows = client.query(query, &[&table]).await?;
    Ok(rows
        .iter()
        .map(|row| ForeignKeyRef {
            constraint_name: row.get(0),
            table: row.get(1),
            column: row.get(2),
            referenced_table: row.get(3),
            referenced_column: row.get(4),
        })
        .collect())
}

/// Tables with a foreign key pointing at `table`.
pub async fn referencing_tables(
    client: &Client,
    table: &str,
) -> Result<Vec<String>, PostgresError> {
    let query = "
        SELECT DISTINCT cl.relname::text
        FROM pg_constraint con
        JOIN pg_class cl ON cl.oid = con.conrelid
        JOIN pg_class ref ON ref.oid = con.confrelid
        JOIN pg_namespace ns ON ns.oid = ref.relnamespace
        WHERE con.contype = 'f'
        AND ns.nspname = current_schema()
        AND ref.relname::text = $1
        ORDER BY 1
    ";

    let rows = client.query(query, &[&table]).await?;
    Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
}

fn column_from_row(row: &Row) -> ColumnDescriptor {
    let name: String = row.get(0);
    let data_type: String = row.get(1);
    let length: Option<i32> = row.get(2);
    let default: Option<String> = row.get(3);
    let is_nullable: String = row.get(4);
    let precision: Option<i32> = row.get(5);
    let scale: Option<i32> = row.get(6);

    build_column(
        name,
        data_type,
        length,
        default,
        &is_nullable,
        precision,
        scale,
    )
}

fn build_column(
    name: String,
    data_type: String,
    length: Option<i32>,
    default: Option<String>,
    is_nullable: &str,
    precision: Option<i32>,
    scale: Option<i32>,
) -> ColumnDescriptor {
    let to_u32 = |v: Option<i32>| v.and_then(|v| u32::try_from(v).ok());

    let mut column = ColumnDescriptor::new(name, data_type)
        .with_numeric(to_u32(precision), to_u32(scale));
    if let Some(length) = to_u32(length) {
        column = column.with_length(length);
    }
    if is_nullable.eq_ignore_ascii_case("NO") {
        column = column.not_null();
    }
    if let Some(default) = default {
        column = column.with_default(default);
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzz_core::{Dialect, FieldKind};

    #[test]
    fn test_varchar_column() {
        let column = build_column(
            "firstname".into(),
            "character varying".into(),
            Some(30),
            None,
            "NO",
            None,
            None,
        );
        assert!(!column.nullable);
        assert_eq!(column.length, Some(30));
        let field = Dialect::Postgres.classify(&column);
        assert_eq!(field.kind, FieldKind::String);
        assert_eq!(field.length, Some(30));
    }

    #[test]
    fn test_numeric_column() {
        let column = build_column(
            "amount".into(),
            "numeric".into(),
            None,
            None,
            "NO",
            Some(12),
            Some(4),
        );
        assert_eq!(column.precision, Some(12));
        assert_eq!(column.scale, Some(4));
        assert_eq!(Dialect::Postgres.classify(&column).length, Some(8));
    }

    #[test]
    fn test_serial_column_has_default() {
        let column = build_column(
            "id".into(),
            "integer".into(),
            None,
            Some("nextval('t_currency_id_seq'::regclass)".into()),
            "NO",
            Some(32),
            Some(0),
        );
        assert!(column.has_default());
    }
}
