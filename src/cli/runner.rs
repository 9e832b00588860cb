//! CLI runner - executes a pull

use crate::cli::commands::Cli;
use crate::collector::{CollectStats, Collector, Termination};
use crate::config::Settings;
use crate::error::Result;
use crate::http::HttpClient;
use crate::logging::{RunLog, TracingLog};
use crate::output::RowWriter;
use crate::types::AnimeRow;
use chrono::{DateTime, Local, TimeDelta};
use std::path::PathBuf;
use std::sync::Arc;

/// What happened to the collected rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// Nothing was collected; the writer was not invoked
    NoData,
    /// The snapshot file holds `rows` rows
    Written { path: PathBuf, rows: usize },
    /// Writing failed; the failure was logged
    Failed { path: PathBuf, message: String },
}

impl WriteStatus {
    /// Check if a snapshot file was produced
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Summary of one pull
#[derive(Debug)]
pub struct RunReport {
    /// When the run started (local time)
    pub started_at: DateTime<Local>,
    /// When the run finished (local time)
    pub finished_at: DateTime<Local>,
    /// How collection ended
    pub termination: Termination,
    /// Collection counters
    pub stats: CollectStats,
    /// Result of persisting the rows
    pub write: WriteStatus,
}

impl RunReport {
    /// Wall-clock time of the run
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at - self.started_at
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
    log: Arc<dyn RunLog>,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            log: Arc::new(TracingLog),
        }
    }

    /// Report through `log` instead of `tracing`
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn RunLog>) -> Self {
        self.log = log;
        self
    }

    /// Run the pull.
    ///
    /// Returns an error only for configuration problems; page failures and
    /// write failures are logged and reflected in the report.
    pub async fn run(&self) -> Result<RunReport> {
        let settings = Settings::from_cli(&self.cli)?;
        self.pull(&settings).await
    }

    /// Collect every reachable page and persist the rows
    pub async fn pull(&self, settings: &Settings) -> Result<RunReport> {
        let started_at = Local::now();
        self.log
            .info(&format!("Starting pull from {}", settings.base_url));

        let client = HttpClient::with_config(settings.base_url.clone(), settings.http.clone())?;
        let mut collector =
            Collector::new(client, settings.collector.clone()).with_log(self.log.clone());
        let outcome = collector.collect().await;

        let writer = settings.writer();
        let write = persist(&outcome.rows, writer.as_ref(), self.log.as_ref());

        let finished_at = Local::now();
        let report = RunReport {
            started_at,
            finished_at,
            termination: outcome.termination,
            stats: outcome.stats,
            write,
        };
        self.log.info(&format!(
            "Run finished in {}ms ({} attempts, {} retries)",
            report.elapsed().num_milliseconds(),
            report.stats.attempts,
            report.stats.retries
        ));

        Ok(report)
    }
}

/// Hand the accumulator to `writer` once.
///
/// An empty accumulator never reaches the writer, so no file is produced.
pub fn persist(rows: &[AnimeRow], writer: &dyn RowWriter, log: &dyn RunLog) -> WriteStatus {
    let path = writer.path().to_path_buf();

    if rows.is_empty() {
        log.warn("No anime data collected");
        return WriteStatus::NoData;
    }

    match writer.write(rows) {
        Ok(rows) => {
            log.info(&format!(
                "Done! {} created with {rows} records",
                path.display()
            ));
            WriteStatus::Written { path, rows }
        }
        Err(e) => {
            log.error(&format!("Error writing {}: {e}", path.display()));
            WriteStatus::Failed {
                path,
                message: e.to_string(),
            }
        }
    }
}
