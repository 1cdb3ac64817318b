//! The run orchestrator.
//!
//! Sequences a full reporting run: clear both tables, load the two
//! datasets, optionally create the auxiliary indexes, execute the selected
//! report, write the output file, and drop the indexes again. Every step's
//! result is checked; the first failure aborts the run (after a best-effort
//! index drop).

use crate::catalog::ReportKind;
use crate::db::{DatabaseClient, QueryResult};
use crate::error::Result;
use crate::export::{write_result, OutputFormat};
use crate::indexes::{IndexManager, DEFAULT_INDEX_PREFIX};
use crate::loader::{clear_table, load_table};
use std::path::PathBuf;
use tracing::{info, warn};

/// Options for one reporting run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Path to the students JSON file.
    pub students_path: PathBuf,

    /// Path to the rooms JSON file.
    pub rooms_path: PathBuf,

    /// Which of the four reports to execute.
    pub report: ReportKind,

    /// Output format (JSON or XML).
    pub format: OutputFormat,

    /// Output file path; defaults to `result.json` / `result.xml` in the
    /// working directory.
    pub output: Option<PathBuf>,

    /// Reference year for age computations.
    pub reference_year: i32,

    /// Whether to create the auxiliary indexes around report execution.
    pub with_indexes: bool,

    /// Prefix for the auxiliary index names.
    pub index_prefix: String,
}

impl RunOptions {
    /// Creates options with defaults for everything but the input paths and
    /// the report selection.
    pub fn new(
        students_path: impl Into<PathBuf>,
        rooms_path: impl Into<PathBuf>,
        report: ReportKind,
        format: OutputFormat,
    ) -> Self {
        Self {
            students_path: students_path.into(),
            rooms_path: rooms_path.into(),
            report,
            format,
            output: None,
            reference_year: crate::catalog::default_reference_year(),
            with_indexes: false,
            index_prefix: DEFAULT_INDEX_PREFIX.to_string(),
        }
    }

    /// Returns the effective output path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.format.default_filename())
    }
}

/// Executes a full reporting run and returns the output file path.
pub async fn run(client: &dyn DatabaseClient, options: &RunOptions) -> Result<PathBuf> {
    // Both tables are truncated and reloaded on every run; no incremental
    // state survives between invocations.
    clear_table(client, "students").await?;
    clear_table(client, "rooms").await?;

    load_table(client, &options.rooms_path, "rooms").await?;
    load_table(client, &options.students_path, "students").await?;

    let indexes = options.with_indexes.then(|| {
        IndexManager::new(options.index_prefix.clone())
    });
    if let Some(manager) = &indexes {
        manager.create(client).await?;
    }

    let outcome = execute_and_write(client, options).await;

    // The indexes are dropped even when the report or the export failed;
    // the original failure takes precedence over a failed drop.
    if let Some(manager) = &indexes {
        match manager.drop(client).await {
            Ok(()) => {}
            Err(e) if outcome.is_ok() => return Err(e),
            Err(e) => warn!("Failed to drop indexes after earlier error: {e}"),
        }
    }

    outcome
}

/// Executes a full reporting run and closes the client afterwards.
///
/// A close failure is logged, never surfaced: the run outcome is what the
/// caller gets, whether that is the output path or the first error of the
/// run itself.
pub async fn run_and_close(
    client: Box<dyn DatabaseClient>,
    options: &RunOptions,
) -> Result<PathBuf> {
    let outcome = run(client.as_ref(), options).await;
    if let Err(e) = client.close().await {
        warn!("Failed to close connection: {e}");
    }
    outcome
}

/// Runs the selected report and writes its row set to the output file.
async fn execute_and_write(
    client: &dyn DatabaseClient,
    options: &RunOptions,
) -> Result<PathBuf> {
    let result = execute_report(client, options).await?;

    let path = options.output_path();
    write_result(options.format, &result, &path)?;
    info!("Wrote {} rows to {}", result.row_count, path.display());

    Ok(path)
}

/// Executes the selected report against the loaded tables.
pub async fn execute_report(
    client: &dyn DatabaseClient,
    options: &RunOptions,
) -> Result<QueryResult> {
    let report = options.report;
    let sql = report.sql(client.backend());
    let params = report.params(options.reference_year);

    info!(
        "Executing report {} ({})",
        report.selector(),
        report.description()
    );
    let result = client.fetch(&sql, &params).await?;
    info!(
        "Report returned {} rows in {:?}",
        result.row_count, result.execution_time
    );

    Ok(result)
}
