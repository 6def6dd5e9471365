//! INSERT and lookup statement text for MySQL.

/// Quote an identifier with backticks, doubling any embedded backtick.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Single-row INSERT with one `?` placeholder per column.
pub fn insert_statement(table: &str, columns: &[&str]) -> String {
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({column_list}) VALUES ({placeholders})",
        quote_identifier(table)
    )
}

/// Greatest non-null value of `column` in `table`.
pub fn latest_value_statement(table: &str, column: &str) -> String {
    let column = quote_identifier(column);
    format!(
        "SELECT {column} FROM {} WHERE {column} IS NOT NULL ORDER BY {column} DESC LIMIT 1",
        quote_identifier(table)
    )
}
