//! INSERT and lookup statement text for PostgreSQL.

use fuzz_core::ColumnDescriptor;

/// Quote an identifier with double quotes, doubling any embedded quote.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Target type of the server-side cast for `column`.
///
/// `character` and `bit` without a length mean a length of one, so the
/// declared length is spelled out to keep values from being truncated.
pub fn cast_type(column: &ColumnDescriptor) -> String {
    let data_type = column.raw_type.trim();
    match (data_type.to_ascii_lowercase().as_str(), column.length) {
        ("character" | "bit", Some(length)) => format!("{data_type}({length})"),
        _ => data_type.to_string(),
    }
}

/// Single-row INSERT where `$n` arrives as text and is cast to the column type.
pub fn insert_statement(table: &str, columns: &[&ColumnDescriptor]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", quote_identifier(table));
    }

    let column_list = columns
        .iter()
        .map(|c| quote_identifier(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("CAST(${}::text AS {})", i + 1, cast_type(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({column_list}) VALUES ({placeholders})",
        quote_identifier(table)
    )
}

/// Greatest non-null value of `column` in `table`, rendered as text.
pub fn latest_value_statement(table: &str, column: &str) -> String {
    let column = quote_identifier(column);
    // Alias the output so ORDER BY sorts on the typed column, not its text.
    format!(
        "SELECT {column}::text AS latest FROM {} WHERE {column} IS NOT NULL \
         ORDER BY {column} DESC LIMIT 1",
        quote_identifier(table)
    )
}
