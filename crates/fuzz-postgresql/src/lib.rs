//! PostgreSQL driver for sqlfuzz.
//!
//! - [`client`] - per-worker `tokio_postgres` connections
//! - [`describe`] - catalog queries against `information_schema` and `pg_catalog`
//! - [`insert`] - INSERT and latest-value statement text
//!
//! Every parameter is sent as text and cast server-side to the column's own
//! type, so one binding path covers every supported column type.

pub mod client;
pub mod describe;
pub mod error;
pub mod insert;

pub use client::{PostgresClient, PostgresConfig, PostgresSession};
pub use error::PostgresError;
