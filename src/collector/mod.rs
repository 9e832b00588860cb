//! Paginated collector module
//!
//! The fetch/retry/extract/paginate loop.
//!
//! # Overview
//!
//! [`Collector::collect`] walks the catalog one page at a time as a small
//! state machine ([`CollectState`]). Connection failures and timeouts are
//! retried a fixed number of times with a fixed delay. Any other failure, or
//! running out of attempts, ends the run early: rows already appended are
//! kept and returned, never discarded.
//!
//! ```text
//!   Fetching ──ok──▶ Extracting ──more──▶ Paginating ──▶ Fetching(page+1)
//!     │  ▲              │   └──last page──▶ Finished(Completed)
//!     │  └─ Retrying ◀──┤ transient, attempts left
//!     └─────────────────┴──other error──▶ Finished(Failed)
//! ```

mod types;

pub use types::{
    CollectOutcome, CollectState, CollectStats, CollectorConfig, PageSource, Termination,
};

use crate::decode::JsonDecoder;
use crate::error::Error;
use crate::logging::{RunLog, TracingLog};
use crate::pagination::{NextPage, PageNumberPaginator, PaginationState, StopReason};
use crate::types::AnimeRow;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Drives one collection run against a [`PageSource`]
pub struct Collector<S> {
    /// Where pages come from
    source: S,
    /// Page numbering and continuation
    paginator: PageNumberPaginator,
    /// Record list to rows
    decoder: JsonDecoder,
    /// Attempts and delays
    config: CollectorConfig,
    /// Event sink
    log: Arc<dyn RunLog>,
    /// Statistics of the last run
    stats: CollectStats,
}

impl<S: PageSource> Collector<S> {
    /// Create a collector logging through `tracing`
    pub fn new(source: S, config: CollectorConfig) -> Self {
        Self {
            source,
            paginator: PageNumberPaginator::default(),
            decoder: JsonDecoder::default(),
            config,
            log: Arc::new(TracingLog),
            stats: CollectStats::default(),
        }
    }

    /// Report through `log` instead
    #[must_use]
    pub fn with_log(mut self, log: Arc<dyn RunLog>) -> Self {
        self.log = log;
        self
    }

    /// Use a different paginator
    #[must_use]
    pub fn with_paginator(mut self, paginator: PageNumberPaginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Get the page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the configuration
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Get statistics of the last run
    pub fn stats(&self) -> &CollectStats {
        &self.stats
    }

    /// Run to a terminal state and hand back the accumulator.
    ///
    /// Never fails: per-page errors end up in [`Termination::Failed`] and the
    /// rows gathered before them are still returned.
    pub async fn collect(&mut self) -> CollectOutcome {
        let start = Instant::now();
        self.stats = CollectStats::new();

        let mut rows = Vec::new();
        let mut pagination = self.paginator.initial_state();
        let mut state = CollectState::Fetching {
            page: pagination.page,
            attempt: 1,
        };

        let termination = loop {
            state = match state {
                CollectState::Fetching { page, attempt } => self.fetch(page, attempt).await,
                CollectState::Retrying {
                    page,
                    attempt,
                    error,
                } => self.retry(page, attempt, &error).await,
                CollectState::Extracting { page, body } => {
                    self.extract(page, &body, &mut rows, &mut pagination)
                }
                CollectState::Paginating { next_page } => self.paginate(next_page).await,
                CollectState::Finished(termination) => break termination,
            };
        };

        self.stats.set_duration(start.elapsed().as_millis() as u64);

        match &termination {
            Termination::Completed { last_page } => self.log.info(&format!(
                "Collected {} records from {} pages (last page {last_page})",
                rows.len(),
                self.stats.pages_fetched
            )),
            Termination::Failed { page, .. } => self.log.warn(&format!(
                "Stopped at page {page}; keeping {} records collected so far",
                rows.len()
            )),
        }

        CollectOutcome {
            rows,
            termination,
            stats: self.stats.clone(),
        }
    }

    async fn fetch(&mut self, page: u32, attempt: u32) -> CollectState {
        if attempt == 1 {
            self.log.info(&format!("Fetching page {page}..."));
        } else {
            self.log.info(&format!(
                "Fetching page {page}... (attempt {attempt}/{})",
                self.config.max_attempts
            ));
        }
        self.stats.add_attempt();

        match self.source.fetch_page(page).await {
            Ok(body) => CollectState::Extracting { page, body },
            Err(error) if error.is_transient() && attempt < self.config.max_attempts => {
                CollectState::Retrying {
                    page,
                    attempt,
                    error,
                }
            }
            Err(error) if error.is_transient() => {
                let error = Error::retries_exhausted(page, attempt, error);
                self.log.error(&error.to_string());
                CollectState::Finished(Termination::Failed { page, error })
            }
            Err(error) => {
                let what = match &error {
                    Error::JsonParse(_) => "Error parsing JSON from page",
                    _ => "Error fetching page",
                };
                self.log.error(&format!("{what} {page}: {error}"));
                CollectState::Finished(Termination::Failed { page, error })
            }
        }
    }

    async fn retry(&mut self, page: u32, attempt: u32, error: &Error) -> CollectState {
        self.log.warn(&format!(
            "Connection error on page {page}, retrying in {:?}... (attempt {attempt}/{}): {error}",
            self.config.retry_delay, self.config.max_attempts
        ));
        self.stats.add_retry();
        tokio::time::sleep(self.config.retry_delay).await;

        CollectState::Fetching {
            page,
            attempt: attempt + 1,
        }
    }

    fn extract(
        &mut self,
        page: u32,
        body: &Value,
        rows: &mut Vec<AnimeRow>,
        pagination: &mut PaginationState,
    ) -> CollectState {
        let entries = match self.decoder.decode_rows(body) {
            Ok(entries) => entries,
            Err(error) => {
                self.log
                    .error(&format!("Error extracting anime data from page {page}: {error}"));
                return CollectState::Finished(Termination::Failed { page, error });
            }
        };

        // Rows are appended as they are mapped; a bad entry keeps the ones before it
        let mut count = 0;
        for entry in entries {
            match entry {
                Ok(row) => {
                    rows.push(row);
                    count += 1;
                }
                Err(error) => {
                    self.stats.add_records(count);
                    self.log.error(&format!(
                        "Error extracting anime data from page {page}: {error} \
                         (keeping {count} records from this page)"
                    ));
                    return CollectState::Finished(Termination::Failed { page, error });
                }
            }
        }

        self.stats.add_page(count);
        self.log.info(&format!(
            "Page {page}: {count} records ({} total)",
            rows.len()
        ));

        match self.paginator.process_response(body, pagination) {
            NextPage::Continue { page: next_page } => CollectState::Paginating { next_page },
            NextPage::Done {
                reason: StopReason::LastPage,
            } => CollectState::Finished(Termination::Completed { last_page: page }),
            NextPage::Done {
                reason: StopReason::FlagMissing,
            } => {
                self.log.warn(&format!(
                    "Page {page} has no usable '{}' flag; treating it as the last page",
                    self.paginator.flag_path
                ));
                CollectState::Finished(Termination::Completed { last_page: page })
            }
        }
    }

    async fn paginate(&mut self, next_page: u32) -> CollectState {
        tokio::time::sleep(self.config.page_delay).await;
        CollectState::Fetching {
            page: next_page,
            attempt: 1,
        }
    }
}
