//! Command-line interface for sqlfuzz
//!
//! # Usage Examples
//!
//! ```bash
//! # Single table
//! sqlfuzz --dialect mysql --user root --password root --database testdb \
//!   --table Persons --rows 10 --workers 2
//!
//! # A table and everything it references, reproducibly
//! sqlfuzz -D postgres -u postgres -d testdb -t t_product_stock -s 42
//!
//! # Tables referencing t_currency too
//! sqlfuzz -D mysql -d testdb -t t_currency --with-dependents
//! ```

use anyhow::Context;
use clap::Parser;
use sqlfuzz::{Args, FuzzRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.into_run_config().context("Invalid configuration")?;
    info!(
        "Starting sqlfuzz: dialect={} rows={} workers={} seed={}",
        config.dialect, config.rows, config.workers, config.seed
    );

    let dry_run = config.dry_run;
    let runner = FuzzRunner::new(config)?;

    if dry_run {
        let plan = runner.dry_run().await?;
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?
        );
        return Ok(());
    }

    let report = runner.run().await?;
    info!(
        "Done: {} job(s), {} succeeded, {} failed, {} row(s) in {:.2?} ({:.1} rows/s)",
        report.jobs,
        report.succeeded,
        report.failed,
        report.rows_inserted,
        report.duration,
        report.rows_per_second()
    );
    if report.skipped_columns > 0 {
        info!(
            "{} column value(s) skipped because of unsupported types",
            report.skipped_columns
        );
    }
    Ok(())
}
