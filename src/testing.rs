//! Table fixtures shared by unit and integration tests.
//!
//! Two table sets exist for each dialect:
//!
//! - `single`: one `Persons` table with an auto-generated id and a defaulted
//!   timestamp.
//! - `multi`: `t_currency`, `t_location`, `t_product`, `t_product_desc` and
//!   `t_product_stock`, linked by foreign keys.
//!
//! The `*_columns` / `*_graph` helpers return what `describe` reports for the
//! same tables, so engine tests can run without a server.

use fuzz_core::{ColumnDescriptor, Dialect, ForeignKeyRef, TableGraph};

pub const SINGLE_TABLES: &[&str] = &["Persons"];

/// In creation order; drop in reverse.
pub const MULTI_TABLES: &[&str] = &[
    "t_currency",
    "t_location",
    "t_product",
    "t_product_desc",
    "t_product_stock",
];

const MYSQL_SINGLE: &[&str] = &["CREATE TABLE IF NOT EXISTS `Persons` (
    id INT(6) UNSIGNED AUTO_INCREMENT PRIMARY KEY,
    firstname VARCHAR(30) NOT NULL,
    lastname VARCHAR(30) NOT NULL,
    email VARCHAR(50),
    reg_date TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
)"];

const MYSQL_MULTI: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS t_currency (
        id INT NOT NULL,
        shortcut CHAR(3) NOT NULL,
        PRIMARY KEY (id)
    )",
    "CREATE TABLE IF NOT EXISTS t_location (
        id INT NOT NULL,
        location_name TEXT NOT NULL,
        PRIMARY KEY (id)
    )",
    "CREATE TABLE IF NOT EXISTS t_product (
        id INT NOT NULL,
        name TEXT NOT NULL,
        currency_id INT,
        PRIMARY KEY (id),
        FOREIGN KEY (currency_id) REFERENCES t_currency(id)
    )",
    "CREATE TABLE IF NOT EXISTS t_product_desc (
        id INT NOT NULL,
        product_id INT,
        description TEXT NOT NULL,
        PRIMARY KEY (id),
        FOREIGN KEY (product_id) REFERENCES t_product(id)
    )",
    "CREATE TABLE IF NOT EXISTS t_product_stock (
        product_id INT NOT NULL,
        location_id INT NOT NULL,
        amount NUMERIC NOT NULL,
        FOREIGN KEY (product_id) REFERENCES t_product(id),
        FOREIGN KEY (location_id) REFERENCES t_location(id)
    )",
];

const POSTGRES_SINGLE: &[&str] = &[r#"CREATE TABLE IF NOT EXISTS "Persons" (
    id SERIAL PRIMARY KEY,
    firstname VARCHAR(30) NOT NULL,
    lastname VARCHAR(30) NOT NULL,
    email VARCHAR(50),
    reg_date TIMESTAMP DEFAULT now()
)"#];

const POSTGRES_MULTI: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS t_currency (
        id INTEGER PRIMARY KEY,
        shortcut CHARACTER(3) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS t_location (
        id INTEGER PRIMARY KEY,
        location_name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS t_product (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        currency_id INTEGER REFERENCES t_currency(id)
    )",
    "CREATE TABLE IF NOT EXISTS t_product_desc (
        id INTEGER PRIMARY KEY,
        product_id INTEGER REFERENCES t_product(id),
        description TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS t_product_stock (
        product_id INTEGER NOT NULL REFERENCES t_product(id),
        location_id INTEGER NOT NULL REFERENCES t_location(id),
        amount NUMERIC NOT NULL
    )",
];

/// CREATE statements for the `single` set.
pub fn single_schema(dialect: Dialect) -> &'static [&'static str] {
    match dialect {
        Dialect::MySql => MYSQL_SINGLE,
        Dialect::Postgres => POSTGRES_SINGLE,
    }
}

/// CREATE statements for the `multi` set, parents first.
pub fn multi_schema(dialect: Dialect) -> &'static [&'static str] {
    match dialect {
        Dialect::MySql => MYSQL_MULTI,
        Dialect::Postgres => POSTGRES_MULTI,
    }
}

/// DROP statements for `tables`, children first.
pub fn drop_statements(dialect: Dialect, tables: &[&str]) -> Vec<String> {
    tables
        .iter()
        .rev()
        .map(|table| {
            let table = match dialect {
                Dialect::MySql => fuzz_mysql::insert::quote_identifier(table),
                Dialect::Postgres => fuzz_postgresql::insert::quote_identifier(table),
            };
            format!("DROP TABLE IF EXISTS {table}")
        })
        .collect()
}

/// `Persons` as `describe` reports it.
pub fn persons_columns(dialect: Dialect) -> Vec<ColumnDescriptor> {
    match dialect {
        Dialect::MySql => vec![
            ColumnDescriptor::new("id", "int(6) unsigned")
                .not_null()
                .with_key("PRI")
                .with_extra("auto_increment"),
            ColumnDescriptor::new("firstname", "varchar(30)").not_null(),
            ColumnDescriptor::new("lastname", "varchar(30)").not_null(),
            ColumnDescriptor::new("email", "varchar(50)"),
            ColumnDescriptor::new("reg_date", "timestamp")
                .with_default("CURRENT_TIMESTAMP")
                .with_extra("DEFAULT_GENERATED on update CURRENT_TIMESTAMP"),
        ],
        Dialect::Postgres => vec![
            ColumnDescriptor::new("id", "integer")
                .not_null()
                .with_numeric(Some(32), Some(0))
                .with_default("nextval('\"Persons_id_seq\"'::regclass)"),
            ColumnDescriptor::new("firstname", "character varying")
                .not_null()
                .with_length(30),
            ColumnDescriptor::new("lastname", "character varying")
                .not_null()
                .with_length(30),
            ColumnDescriptor::new("email", "character varying").with_length(50),
            ColumnDescriptor::new("reg_date", "timestamp without time zone")
                .with_default("now()"),
        ],
    }
}

/// The `multi` set as `multi_describe` reports it.
pub fn product_graph(dialect: Dialect) -> TableGraph {
    let int = || match dialect {
        Dialect::MySql => ColumnDescriptor::new("", "int"),
        Dialect::Postgres => {
            ColumnDescriptor::new("", "integer").with_numeric(Some(32), Some(0))
        }
    };
    let named = |name: &str, column: ColumnDescriptor| ColumnDescriptor {
        name: name.to_string(),
        ..column
    };
    let id = || {
        let column = named("id", int()).not_null();
        match dialect {
            Dialect::MySql => column.with_key("PRI"),
            Dialect::Postgres => column,
        }
    };
    let text = |name: &str| named(name, ColumnDescriptor::new("", "text")).not_null();
    let reference = |table: &str, name: &str, referenced_table: &str, nullable: bool| {
        let constraint_name = match dialect {
            Dialect::MySql => format!("{table}_ibfk_{name}"),
            Dialect::Postgres => format!("{table}_{name}_fkey"),
        };
        let mut column = named(name, int()).with_foreign_key(ForeignKeyRef {
            constraint_name,
            table: table.to_string(),
            column: name.to_string(),
            referenced_table: referenced_table.to_string(),
            referenced_column: "id".to_string(),
        });
        if !nullable {
            column = column.not_null();
        }
        column
    };

    let shortcut = match dialect {
        Dialect::MySql => ColumnDescriptor::new("shortcut", "char(3)"),
        Dialect::Postgres => ColumnDescriptor::new("shortcut", "character").with_length(3),
    }
    .not_null();
    let amount = match dialect {
        Dialect::MySql => ColumnDescriptor::new("amount", "decimal(10,0)"),
        Dialect::Postgres => ColumnDescriptor::new("amount", "numeric"),
    }
    .not_null();

    let mut graph = TableGraph::new();
    graph.insert("t_currency", vec![id(), shortcut]);
    graph.insert("t_location", vec![id(), text("location_name")]);
    graph.insert(
        "t_product",
        vec![
            id(),
            text("name"),
            reference("t_product", "currency_id", "t_currency", true),
        ],
    );
    graph.insert(
        "t_product_desc",
        vec![
            id(),
            reference("t_product_desc", "product_id", "t_product", true),
            text("description"),
        ],
    );
    graph.insert(
        "t_product_stock",
        vec![
            reference("t_product_stock", "product_id", "t_product", false),
            reference("t_product_stock", "location_id", "t_location", false),
            amount,
        ],
    );
    graph
}
