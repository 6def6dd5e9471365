//! Core types for sqlfuzz.
//!
//! This crate holds everything that does not need a live database:
//!
//! - [`FieldKind`] / [`Field`] - the dialect-independent classification of a column
//! - [`ColumnDescriptor`] / [`ForeignKeyRef`] - what the catalog tells us about a column
//! - [`Dialect`] - per-dialect rule tables mapping raw type strings to a [`Field`]
//! - [`TableGraph`] / [`InsertionPlan`] - the foreign-key closure of a set of tables
//!   and the order in which rows have to be inserted
//! - [`GeneratedValue`] - a value produced for one column of one row
//!
//! # Architecture
//!
//! ```text
//! fuzz-core (this crate)
//!    │
//!    ├─── fuzz-generator    (produces GeneratedValue from a Field)
//!    ├─── fuzz-mysql        (implements Catalog for MySQL, binds GeneratedValue)
//!    └─── fuzz-postgresql   (implements Catalog for PostgreSQL, binds GeneratedValue)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fuzz_core::{ColumnDescriptor, Dialect, FieldKind};
//!
//! let column = ColumnDescriptor::new("price", "decimal(12,4)");
//! let field = Dialect::MySql.classify(&column);
//! assert_eq!(field.kind, FieldKind::Float);
//! assert_eq!(field.length, Some(8));
//! ```

pub mod classify;
pub mod column;
pub mod graph;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use classify::Dialect;
pub use column::{ColumnDescriptor, ForeignKeyRef};
pub use graph::{
    describe_closure, insertion_order, resolve, Catalog, Closure, InsertionPlan, OrderError,
    ResolveError, TableGraph,
};
pub use types::{Field, FieldKind};
pub use values::GeneratedValue;
