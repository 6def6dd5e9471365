//! sqlfuzz
//!
//! Fills MySQL or PostgreSQL tables with random rows. Columns are discovered
//! from the live catalog, tables are ordered so that referenced tables receive
//! rows before the tables pointing at them, and a fixed pool of workers inserts
//! rows concurrently, one connection each.
//!
//! # Crates
//!
//! - `fuzz_core` - column metadata, type classification, table graph and ordering
//! - `fuzz_generator` - seeded per-type value generation
//! - `fuzz_mysql` / `fuzz_postgresql` - catalog queries and inserts per dialect
//!
//! # CLI Usage
//!
//! ```bash
//! # 1000 rows into Persons with 20 workers
//! sqlfuzz -D mysql -u root -p root -d testdb -t Persons
//!
//! # Every table of the database, parents first
//! sqlfuzz -D postgres -u postgres -d testdb -n 500 -w 8
//!
//! # Show the resolved tables and statements without inserting
//! sqlfuzz -D mysql -d testdb -t t_product --dry-run
//! ```

pub mod config;
pub mod driver;
pub mod insert;
pub mod runner;
pub mod testing;

pub use config::{Args, RunConfig};
pub use driver::{Driver, DriverError, Session};
pub use insert::{Executor, InsertError, InsertionEngine};
pub use runner::{FuzzRunner, Mode, Resolution, RunReport};
