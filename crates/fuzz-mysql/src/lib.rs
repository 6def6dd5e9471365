//! MySQL driver for sqlfuzz.
//!
//! - [`client`] - connection pool sized from the run configuration
//! - [`describe`] - catalog queries (`DESCRIBE`, `KEY_COLUMN_USAGE`, table list)
//! - [`insert`] - INSERT and latest-value statement text
//! - [`value`] - conversion between [`GeneratedValue`](fuzz_core::GeneratedValue)
//!   and `mysql_async::Value`
//!
//! A [`MySqlSession`] wraps one pooled connection and is owned by exactly one
//! worker.

pub mod client;
pub mod describe;
pub mod error;
pub mod insert;
pub mod value;

pub use client::{MySqlClient, MySqlConfig, MySqlSession};
pub use error::MySqlError;
pub use value::MySqlParam;
