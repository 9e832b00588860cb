//! Collector types
//!
//! Page source seam, run configuration, state machine states and run results.

use crate::error::{Error, Result};
use crate::types::AnimeRow;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Anything that can fetch one page of the catalog as JSON
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch page `page` (1-based) and parse its body
    async fn fetch_page(&self, page: u32) -> Result<Value>;
}

/// Configuration for a collection run
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Attempts per page before giving up on transient failures
    pub max_attempts: u32,
    /// Fixed delay between attempts of the same page
    pub retry_delay: Duration,
    /// Fixed delay after a successful page, before the next one
    pub page_delay: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
            page_delay: Duration::from_secs(1),
        }
    }
}

impl CollectorConfig {
    /// Create a new collector config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set attempts per page (at least one)
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the delay between attempts
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the delay between pages
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// No waiting anywhere
    #[must_use]
    pub fn without_delays(self) -> Self {
        self.with_retry_delay(Duration::ZERO)
            .with_page_delay(Duration::ZERO)
    }
}

/// A state of the collection loop
#[derive(Debug)]
pub enum CollectState {
    /// About to request `page`; `attempt` counts from 1
    Fetching { page: u32, attempt: u32 },
    /// `attempt` failed transiently; wait, then try again
    Retrying { page: u32, attempt: u32, error: Error },
    /// `page` arrived; map its records
    Extracting { page: u32, body: Value },
    /// A page is done and more remain; pace, then fetch `next_page`
    Paginating { next_page: u32 },
    /// Terminal
    Finished(Termination),
}

/// How a run ended
#[derive(Debug)]
pub enum Termination {
    /// The API reported no further pages after `last_page`
    Completed { last_page: u32 },
    /// `page` could not be fetched or decoded; earlier pages are kept
    Failed { page: u32, error: Error },
}

impl Termination {
    /// Check if every page was collected
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Check if the run stopped on an error
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The error that stopped the run, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Statistics from a collection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    /// Pages fetched and decoded successfully
    pub pages_fetched: usize,
    /// Fetch attempts, retries included
    pub attempts: usize,
    /// Delays taken before a retry
    pub retries: usize,
    /// Rows in the accumulator
    pub records_collected: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl CollectStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fetch attempt
    pub fn add_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Add a retry
    pub fn add_retry(&mut self) {
        self.retries += 1;
    }

    /// Add a decoded page with `records` rows
    pub fn add_page(&mut self, records: usize) {
        self.pages_fetched += 1;
        self.add_records(records);
    }

    /// Add rows kept from a page that failed part way
    pub fn add_records(&mut self, records: usize) {
        self.records_collected += records;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Everything a run produced
#[derive(Debug)]
pub struct CollectOutcome {
    /// Accumulated rows, in encounter order
    pub rows: Vec<AnimeRow>,
    /// Why the run stopped
    pub termination: Termination,
    /// Counters for the run
    pub stats: CollectStats,
}
