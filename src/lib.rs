// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # anime-snapshot
//!
//! Pulls a paginated anime catalog API page by page and writes one snapshot
//! file of the records it could collect.
//!
//! ## Features
//!
//! - **Page-number pagination**: `?page=N` until `pagination.has_next_page` is false
//! - **Retry**: connection errors and timeouts retried with a fixed delay
//! - **Partial results**: a failing page ends the run but keeps earlier pages
//! - **Arrow output**: CSV (default) or Parquet via Arrow `RecordBatch`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use anime_snapshot::collector::{Collector, CollectorConfig};
//! use anime_snapshot::http::HttpClient;
//! use anime_snapshot::output::{CsvRowWriter, RowWriter};
//!
//! #[tokio::main]
//! async fn main() -> anime_snapshot::Result<()> {
//!     let client = HttpClient::new("https://api.example.com/anime")?;
//!     let mut collector = Collector::new(client, CollectorConfig::default());
//!
//!     let outcome = collector.collect().await;
//!     if !outcome.rows.is_empty() {
//!         CsvRowWriter::new("data/anime_data.csv").write(&outcome.rows)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Runner (cli, config)                     │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//! ┌──────────┬─────────────────┴──┬────────────┬─────────────┐
//! │   HTTP   │     Collector      │  Paginate  │   Output    │
//! ├──────────┼────────────────────┼────────────┼─────────────┤
//! │ GET page │ Fetch → Retry      │ Page N     │ Arrow batch │
//! │ Timeout  │ Extract → Paginate │ has_next   │ CSV         │
//! │          │ Finished           │            │ Parquet     │
//! └──────────┴────────────────────┴────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and JSON helpers
pub mod types;

/// HTTP page source
pub mod http;

/// Page-number pagination
pub mod pagination;

/// Record decoding
pub mod decode;

/// Fetch/retry/paginate state machine
pub mod collector;

/// CSV/Parquet output
pub mod output;

/// Run log and subscriber setup
pub mod logging;

/// Run settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
