//! Fuzz runner: resolve the schema, then fan jobs out to a fixed worker pool.
//!
//! A run moves through setup (connect one session per worker and resolve the
//! tables), dispatch (one token per job into a bounded queue), execution (every
//! worker drains the shared queue), and drain (every worker is joined). Jobs
//! that fail are logged and counted; they never stop other workers.

use crate::config::RunConfig;
use crate::driver::{insert_sql, Driver, Session};
use crate::insert::{Executor, InsertError, InsertionEngine};
use anyhow::Context;
use async_trait::async_trait;
use fuzz_core::{
    resolve, ColumnDescriptor, Dialect, Field, GeneratedValue, InsertionPlan, TableGraph,
};
use fuzz_generator::DataGenerator;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

/// What a single job inserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Mode {
    /// One row into one table without foreign keys.
    Single { table: String },
    /// One row into every table of the plan, in plan order.
    Multi,
}

impl Mode {
    /// Single-table mode for one requested table without foreign keys.
    pub fn select(requested: &[String], graph: &TableGraph) -> Self {
        match requested {
            [table] if graph.len() == 1 && !graph.has_foreign_keys() => Mode::Single {
                table: table.clone(),
            },
            _ => Mode::Multi,
        }
    }
}

/// Resolved schema for a run.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub mode: Mode,
    pub graph: TableGraph,
    pub plan: InsertionPlan,
}

impl Resolution {
    /// Describe what a run would do, without touching the database.
    pub fn dry_run(&self, dialect: Dialect) -> DryRun {
        let tables = self
            .plan
            .iter()
            .filter(|table| match &self.mode {
                Mode::Single { table: single } => single == table,
                Mode::Multi => true,
            })
            .filter_map(|table| {
                let columns = self.graph.columns(table)?;
                let bound: Vec<&ColumnDescriptor> =
                    columns.iter().filter(|c| !c.has_default()).collect();
                Some(TablePlan {
                    table: table.to_string(),
                    columns: columns
                        .iter()
                        .map(|column| ColumnPlan {
                            column: column.name.clone(),
                            raw_type: column.raw_type.clone(),
                            field: dialect.classify(column),
                            defaulted: column.has_default(),
                            references: column.foreign_key.as_ref().map(|fk| {
                                format!("{}.{}", fk.referenced_table, fk.referenced_column)
                            }),
                        })
                        .collect(),
                    statement: insert_sql(dialect, table, &bound),
                })
            })
            .collect();

        DryRun {
            dialect,
            mode: self.mode.clone(),
            plan: self.plan.clone(),
            tables,
        }
    }
}

/// Printed by `--dry-run`.
#[derive(Debug, Serialize)]
pub struct DryRun {
    pub dialect: Dialect,
    #[serde(flatten)]
    pub mode: Mode,
    pub plan: InsertionPlan,
    pub tables: Vec<TablePlan>,
}

#[derive(Debug, Serialize)]
pub struct TablePlan {
    pub table: String,
    pub columns: Vec<ColumnPlan>,
    /// INSERT text before columns with an unknown type are dropped
    pub statement: String,
}

#[derive(Debug, Serialize)]
pub struct ColumnPlan {
    pub column: String,
    pub raw_type: String,
    pub field: Field,
    /// Filled by the database, never bound
    pub defaulted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub mode: Mode,
    /// Jobs dispatched
    pub jobs: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Rows committed, including parents written by jobs that later failed
    pub rows_inserted: u64,
    /// Column values left out because their type is unknown
    pub skipped_columns: u64,
    pub duration: Duration,
}

impl RunReport {
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

#[derive(Debug, Default)]
struct WorkerStats {
    succeeded: u64,
    failed: u64,
    rows_inserted: u64,
    skipped_columns: u64,
}

/// Counts the inserts its inner executor reports as committed.
struct CountingExecutor<E> {
    inner: E,
    inserted: u64,
}

#[async_trait]
impl<E: Executor> Executor for CountingExecutor<E> {
    type Error = E::Error;

    async fn insert(
        &mut self,
        table: &str,
        columns: &[&ColumnDescriptor],
        values: Vec<GeneratedValue>,
    ) -> Result<(), E::Error> {
        self.inner.insert(table, columns, values).await?;
        self.inserted += 1;
        Ok(())
    }

    async fn latest_column_value(
        &mut self,
        table: &str,
        column: &str,
    ) -> Result<Option<GeneratedValue>, E::Error> {
        self.inner.latest_column_value(table, column).await
    }
}

/// Connects, resolves and runs one fuzz session.
pub struct FuzzRunner {
    config: RunConfig,
    driver: Driver,
}

impl FuzzRunner {
    pub fn new(config: RunConfig) -> anyhow::Result<Self> {
        let driver = Driver::new(&config).context("Failed to configure database driver")?;
        Ok(Self { config, driver })
    }

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Describe the requested tables and their closure, and pick the mode.
    pub async fn resolve(&self, session: &mut Session) -> anyhow::Result<Resolution> {
        let (graph, plan) = resolve(session, &self.config.tables, self.config.closure)
            .await
            .context("Failed to resolve tables")?;
        let mode = Mode::select(&self.config.tables, &graph);
        info!(
            "Resolved {} table(s), insertion order: [{}]",
            graph.len(),
            plan.tables().join(", ")
        );
        Ok(Resolution { mode, graph, plan })
    }

    /// Resolve only and report the plan.
    pub async fn dry_run(self) -> anyhow::Result<DryRun> {
        let mut session = self
            .driver
            .session()
            .await
            .with_context(|| format!("Failed to connect to {}", self.driver.connection()))?;
        let resolution = self.resolve(&mut session).await?;
        let dry_run = resolution.dry_run(self.driver.dialect());
        drop(session);
        self.driver.shutdown().await?;
        Ok(dry_run)
    }

    /// Open every worker session, resolve, and insert `rows` jobs.
    pub async fn run(self) -> anyhow::Result<RunReport> {
        let workers = self.config.workers;
        info!(
            "Opening {workers} connection(s) to {}",
            self.driver.connection()
        );
        let mut sessions = Vec::with_capacity(workers);
        for i in 0..workers {
            let session = self.driver.session().await.with_context(|| {
                format!(
                    "Failed to open connection {} of {workers} to {}",
                    i + 1,
                    self.driver.connection()
                )
            })?;
            sessions.push(session);
        }

        let resolution = match sessions.first_mut() {
            Some(session) => self.resolve(session).await?,
            None => anyhow::bail!("no worker sessions"),
        };

        let engine = InsertionEngine::new(self.driver.dialect());
        let report = run_jobs(
            sessions,
            Arc::new(engine),
            Arc::new(resolution),
            self.config.rows,
            self.config.seed,
        )
        .await;

        self.driver
            .shutdown()
            .await
            .context("Failed to close connections")?;
        Ok(report)
    }
}

/// Run `jobs` jobs over one worker per executor.
///
/// Worker `i` generates values with seed `seed + i`.
pub async fn run_jobs<E>(
    executors: Vec<E>,
    engine: Arc<InsertionEngine>,
    resolution: Arc<Resolution>,
    jobs: u64,
    seed: u64,
) -> RunReport
where
    E: Executor + 'static,
{
    let start = Instant::now();
    let workers = executors.len();
    let (tx, rx) = mpsc::channel::<u64>(workers.max(1));
    let rx = Arc::new(Mutex::new(rx));

    info!(
        "Dispatching {jobs} job(s) to {workers} worker(s) in {} mode",
        match resolution.mode {
            Mode::Single { .. } => "single-table",
            Mode::Multi => "multi-table",
        }
    );

    let mut handles = Vec::with_capacity(workers);
    for (i, executor) in executors.into_iter().enumerate() {
        let rx = Arc::clone(&rx);
        let engine = Arc::clone(&engine);
        let resolution = Arc::clone(&resolution);
        let generator = DataGenerator::new(seed.wrapping_add(i as u64));
        handles.push(tokio::spawn(worker(
            i, executor, generator, rx, engine, resolution,
        )));
    }

    let mut dispatched = 0;
    for job in 0..jobs {
        if tx.send(job).await.is_err() {
            error!("Every worker has stopped; {} job(s) not dispatched", jobs - job);
            break;
        }
        dispatched += 1;
    }
    drop(tx);

    let mut stats = WorkerStats::default();
    for handle in handles {
        match handle.await {
            Ok(worker) => {
                stats.succeeded += worker.succeeded;
                stats.failed += worker.failed;
                stats.rows_inserted += worker.rows_inserted;
                stats.skipped_columns += worker.skipped_columns;
            }
            Err(e) => error!("Worker task failed: {e}"),
        }
    }

    RunReport {
        mode: resolution.mode.clone(),
        jobs: dispatched,
        succeeded: stats.succeeded,
        failed: stats.failed,
        rows_inserted: stats.rows_inserted,
        skipped_columns: stats.skipped_columns,
        duration: start.elapsed(),
    }
}

async fn worker<E: Executor>(
    id: usize,
    executor: E,
    mut generator: DataGenerator,
    jobs: Arc<Mutex<mpsc::Receiver<u64>>>,
    engine: Arc<InsertionEngine>,
    resolution: Arc<Resolution>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();
    let mut executor = CountingExecutor {
        inner: executor,
        inserted: 0,
    };

    loop {
        let job = jobs.lock().await.recv().await;
        let Some(job) = job else {
            break;
        };

        match run_job(&mut executor, &mut generator, &engine, &resolution).await {
            Ok(()) => stats.succeeded += 1,
            Err(e) => {
                stats.failed += 1;
                warn!("Worker {id}: job {job} failed: {e}");
            }
        }
    }

    stats.rows_inserted = executor.inserted;
    stats.skipped_columns = generator.skipped_columns();
    debug!(
        "Worker {id} done: {} succeeded, {} failed, {} row(s)",
        stats.succeeded, stats.failed, stats.rows_inserted
    );
    stats
}

async fn run_job<E: Executor>(
    executor: &mut E,
    generator: &mut DataGenerator,
    engine: &InsertionEngine,
    resolution: &Resolution,
) -> Result<(), InsertError> {
    match &resolution.mode {
        Mode::Single { table } => {
            let columns = resolution
                .graph
                .columns(table)
                .ok_or_else(|| InsertError::UnknownTable(table.clone()))?;
            engine.insert_row(executor, generator, table, columns).await
        }
        Mode::Multi => {
            engine
                .insert_multi(executor, generator, &resolution.plan, &resolution.graph)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insert::tests::RecordingExecutor;
    use crate::testing;
    use fuzz_core::insertion_order;
    use std::collections::HashSet;

    fn persons(dialect: Dialect) -> Resolution {
        let mut graph = TableGraph::new();
        graph.insert("Persons", testing::persons_columns(dialect));
        let plan = insertion_order(&graph).unwrap();
        Resolution {
            mode: Mode::select(&["Persons".to_string()], &graph),
            graph,
            plan,
        }
    }

    fn products() -> Resolution {
        let graph = testing::product_graph(Dialect::MySql);
        let plan = insertion_order(&graph).unwrap();
        Resolution {
            mode: Mode::select(&[], &graph),
            graph,
            plan,
        }
    }

    fn executors(n: usize, shared: &RecordingExecutor) -> Vec<RecordingExecutor> {
        (0..n).map(|_| shared.clone()).collect()
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(
            persons(Dialect::MySql).mode,
            Mode::Single {
                table: "Persons".to_string()
            }
        );
        assert_eq!(products().mode, Mode::Multi);

        // A lone requested table with foreign keys still needs its parents.
        let graph = testing::product_graph(Dialect::MySql);
        assert_eq!(Mode::select(&["t_product".to_string()], &graph), Mode::Multi);
    }

    #[tokio::test]
    async fn test_single_table_run_inserts_every_job() {
        let shared = RecordingExecutor::default();
        let report = run_jobs(
            executors(2, &shared),
            Arc::new(InsertionEngine::new(Dialect::MySql)),
            Arc::new(persons(Dialect::MySql)),
            10,
            42,
        )
        .await;

        assert_eq!(report.jobs, 10);
        assert_eq!(report.succeeded, 10);
        assert_eq!(report.failed, 0);
        assert_eq!(report.rows_inserted, 10);
        assert_eq!(report.skipped_columns, 0);

        let rows = shared.rows();
        assert_eq!(rows.len(), 10);
        for (table, row) in &rows {
            assert_eq!(table, "Persons");
            for required in ["id", "firstname", "lastname", "email"] {
                let value = row.iter().find(|(c, _)| c == required).map(|(_, v)| v);
                let text = value.and_then(|v| v.to_sql_text()).unwrap_or_default();
                assert!(!text.is_empty(), "{required} is empty");
            }
            assert!(row.iter().all(|(c, _)| c != "reg_date"));
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_other_jobs() {
        let shared = RecordingExecutor {
            failing: vec!["Persons".to_string()],
            ..Default::default()
        };
        let report = run_jobs(
            executors(3, &shared),
            Arc::new(InsertionEngine::new(Dialect::Postgres)),
            Arc::new(persons(Dialect::Postgres)),
            25,
            7,
        )
        .await;

        assert_eq!(report.jobs, 25);
        assert_eq!(report.failed, 25);
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.rows_per_second(), 0.0);
    }

    #[tokio::test]
    async fn test_multi_table_run_keeps_parents_first() {
        let shared = RecordingExecutor::default();
        let resolution = products();
        let report = run_jobs(
            executors(4, &shared),
            Arc::new(InsertionEngine::new(Dialect::MySql)),
            Arc::new(resolution.clone()),
            20,
            1,
        )
        .await;

        assert_eq!(report.succeeded, 20);
        assert_eq!(report.rows_inserted, 20 * 5);

        let rows = shared.rows();
        assert_eq!(rows.len(), 100);
        let mut seen: HashSet<(String, String)> = HashSet::new();
        for (table, row) in &rows {
            for fk in resolution.graph.foreign_keys(table) {
                let value = row
                    .iter()
                    .find(|(c, _)| *c == fk.column)
                    .and_then(|(_, v)| v.to_sql_text())
                    .unwrap();
                assert!(
                    seen.contains(&(fk.referenced_table.clone(), value.clone())),
                    "{table}.{} = {value} inserted before its parent",
                    fk.column
                );
            }
            if let Some(id) = row
                .iter()
                .find(|(c, _)| c == "id")
                .and_then(|(_, v)| v.to_sql_text())
            {
                seen.insert((table.clone(), id));
            }
        }
    }

    #[tokio::test]
    async fn test_failed_jobs_still_count_committed_parents() {
        let shared = RecordingExecutor {
            failing: vec!["t_product".to_string()],
            ..Default::default()
        };
        let report = run_jobs(
            executors(3, &shared),
            Arc::new(InsertionEngine::new(Dialect::MySql)),
            Arc::new(products()),
            6,
            11,
        )
        .await;

        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 6);
        // t_currency and t_location precede t_product in every job
        assert_eq!(report.rows_inserted, 6 * 2);
        assert_eq!(report.rows_inserted, shared.rows().len() as u64);
        assert!(shared
            .rows()
            .iter()
            .all(|(table, _)| table == "t_currency" || table == "t_location"));
    }

    #[tokio::test]
    async fn test_more_workers_than_jobs() {
        let shared = RecordingExecutor::default();
        let report = run_jobs(
            executors(8, &shared),
            Arc::new(InsertionEngine::new(Dialect::MySql)),
            Arc::new(persons(Dialect::MySql)),
            3,
            5,
        )
        .await;
        assert_eq!(report.succeeded, 3);
        assert_eq!(shared.rows().len(), 3);
    }

    #[test]
    fn test_dry_run_lists_statements() {
        let dry_run = products().dry_run(Dialect::MySql);
        assert_eq!(dry_run.tables.len(), 5);
        assert_eq!(dry_run.tables[0].table, "t_currency");
        assert_eq!(
            dry_run.tables[0].statement,
            "INSERT INTO `t_currency` (`id`, `shortcut`) VALUES (?, ?)"
        );

        let json = serde_json::to_value(&dry_run).unwrap();
        assert_eq!(json["mode"], "multi");
        assert_eq!(json["dialect"], "mysql");
        assert_eq!(json["plan"][0], "t_currency");
        assert_eq!(
            json["tables"][2]["columns"][2]["references"],
            "t_currency.id"
        );
    }

    #[test]
    fn test_dry_run_leaves_out_defaulted_columns() {
        let dry_run = persons(Dialect::Postgres).dry_run(Dialect::Postgres);
        assert_eq!(dry_run.tables.len(), 1);
        let table = &dry_run.tables[0];
        assert!(table.columns[0].defaulted);
        assert!(!table.statement.contains("\"id\""));
        assert!(!table.statement.contains("reg_date"));
    }
}
