//! Command-line and environment configuration.
//!
//! [`Args`] is what clap parses; [`Args::into_run_config`] validates it and
//! fills in dialect-dependent defaults, producing the [`RunConfig`] the rest of
//! the crate works from.

mod duration;

pub use duration::parse_duration;

use clap::Parser;
use fuzz_core::{Closure, Dialect};
use fuzz_mysql::MySqlConfig;
use fuzz_postgresql::PostgresConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Configuration errors detected before connecting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--rows must be at least 1")]
    NoRows,

    #[error("--workers must be at least 1")]
    NoWorkers,

    #[error("--max-open-conns must be at least 1")]
    NoConnections,

    #[error("--database is required")]
    NoDatabase,
}

const DEFAULT_MAX_IDLE_CONNS: usize = 200;
const DEFAULT_CONN_MAX_LIFETIME: Duration = Duration::from_secs(100);

/// Parse a dialect name.
pub fn parse_dialect(s: &str) -> Result<Dialect, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "mysql" => Ok(Dialect::MySql),
        "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
        other => Err(format!(
            "unsupported dialect '{other}' (expected mysql or postgres)"
        )),
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "sqlfuzz")]
#[command(about = "Fill MySQL or PostgreSQL tables with random rows that respect foreign keys")]
#[command(long_about = None)]
pub struct Args {
    /// Database dialect (mysql or postgres)
    #[arg(short = 'D', long, default_value = "mysql", value_parser = parse_dialect, env = "SQLFUZZ_DIALECT")]
    pub dialect: Dialect,

    /// Database user
    #[arg(short = 'u', long, default_value = "root", env = "SQLFUZZ_USER")]
    pub user: String,

    /// Database password
    #[arg(
        short = 'p',
        long,
        default_value = "",
        env = "SQLFUZZ_PASSWORD",
        hide_env_values = true
    )]
    pub password: String,

    /// Database name
    #[arg(short = 'd', long, default_value = "", env = "SQLFUZZ_DATABASE")]
    pub database: String,

    /// Database host
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SQLFUZZ_HOST")]
    pub host: String,

    /// Database port (defaults to 3306 for MySQL, 5432 for PostgreSQL)
    #[arg(short = 'P', long, env = "SQLFUZZ_PORT")]
    pub port: Option<u16>,

    /// Tables to fill, comma separated (all tables when empty)
    #[arg(short = 't', long, value_delimiter = ',', env = "SQLFUZZ_TABLE")]
    pub table: Vec<String>,

    /// Number of jobs; each job inserts one row (one per table in multi-table mode)
    #[arg(short = 'n', long, default_value_t = 1000, env = "SQLFUZZ_ROWS")]
    pub rows: u64,

    /// Number of concurrent workers
    #[arg(short = 'w', long, default_value_t = 20, env = "SQLFUZZ_WORKERS")]
    pub workers: usize,

    /// Random seed (0 picks a random seed and logs it)
    #[arg(short = 's', long, default_value_t = 0, env = "SQLFUZZ_SEED")]
    pub seed: u64,

    /// Maximum idle connections kept in the pool (MySQL only)
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_IDLE_CONNS, env = "SQLFUZZ_MAX_IDLE_CONNS")]
    pub max_idle_conns: usize,

    /// Maximum open connections
    #[arg(short = 'o', long, default_value_t = 1000, env = "SQLFUZZ_MAX_OPEN_CONNS")]
    pub max_open_conns: usize,

    /// Maximum connection lifetime, e.g. 100s, 5m, 1h (MySQL only)
    #[arg(short = 'l', long, default_value = "100s", value_parser = parse_duration, env = "SQLFUZZ_CONN_MAX_LIFETIME")]
    pub conn_max_lifetime: Duration,

    /// Also fill tables that reference the requested tables
    #[arg(long)]
    pub with_dependents: bool,

    /// Resolve tables and print the plan as JSON without inserting
    #[arg(long)]
    pub dry_run: bool,
}

/// Connection target shared by both dialects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Connection pool sizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_idle_conns: usize,
    pub max_open_conns: usize,
    pub conn_max_lifetime: Duration,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dialect: Dialect,
    pub connection: ConnectionConfig,
    pub pool: PoolConfig,
    /// Requested tables; empty means every table
    pub tables: Vec<String>,
    pub rows: u64,
    pub workers: usize,
    /// Never zero
    pub seed: u64,
    pub closure: Closure,
    pub dry_run: bool,
}

impl Args {
    /// Pool flags set away from their defaults that the dialect does not use.
    ///
    /// PostgreSQL workers each open a dedicated connection, so there is no
    /// idle pool and no lifetime to enforce.
    pub fn ignored_pool_flags(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if self.dialect == Dialect::Postgres {
            if self.max_idle_conns != DEFAULT_MAX_IDLE_CONNS {
                ignored.push("--max-idle-conns");
            }
            if self.conn_max_lifetime != DEFAULT_CONN_MAX_LIFETIME {
                ignored.push("--conn-max-lifetime");
            }
        }
        ignored
    }

    /// Validate and fill in defaults.
    pub fn into_run_config(self) -> Result<RunConfig, ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.max_open_conns == 0 {
            return Err(ConfigError::NoConnections);
        }
        if self.database.trim().is_empty() {
            return Err(ConfigError::NoDatabase);
        }

        for flag in self.ignored_pool_flags() {
            warn!(
                "{flag} has no effect with {}; each worker opens its own connection",
                self.dialect
            );
        }

        let workers = if self.workers > self.max_open_conns {
            warn!(
                "Reducing workers from {} to {} to stay within --max-open-conns",
                self.workers, self.max_open_conns
            );
            self.max_open_conns
        } else {
            self.workers
        };

        let seed = if self.seed == 0 {
            let seed = random_seed();
            info!("Using random seed {seed} (pass --seed {seed} to reproduce)");
            seed
        } else {
            self.seed
        };

        let port = self.port.unwrap_or(match self.dialect {
            Dialect::MySql => 3306,
            Dialect::Postgres => 5432,
        });

        let tables = self
            .table
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(RunConfig {
            dialect: self.dialect,
            connection: ConnectionConfig {
                host: self.host,
                port,
                user: self.user,
                password: self.password,
                database: self.database,
            },
            pool: PoolConfig {
                max_idle_conns: self.max_idle_conns,
                max_open_conns: self.max_open_conns,
                conn_max_lifetime: self.conn_max_lifetime,
            },
            tables,
            rows: self.rows,
            workers,
            seed,
            closure: if self.with_dependents {
                Closure::ReferencesAndDependents
            } else {
                Closure::References
            },
            dry_run: self.dry_run,
        })
    }
}

fn random_seed() -> u64 {
    loop {
        let seed = rand::random::<u64>();
        if seed != 0 {
            return seed;
        }
    }
}

impl RunConfig {
    pub fn mysql_config(&self) -> MySqlConfig {
        MySqlConfig {
            host: self.connection.host.clone(),
            port: self.connection.port,
            user: self.connection.user.clone(),
            password: self.connection.password.clone(),
            database: self.connection.database.clone(),
            max_idle_conns: self.pool.max_idle_conns,
            max_open_conns: self.pool.max_open_conns,
            conn_max_lifetime: self.pool.conn_max_lifetime,
        }
    }

    pub fn postgres_config(&self) -> PostgresConfig {
        PostgresConfig {
            host: self.connection.host.clone(),
            port: self.connection.port,
            user: self.connection.user.clone(),
            password: self.connection.password.clone(),
            database: self.connection.database.clone(),
        }
    }
}
