//! Run settings
//!
//! Resolves the parsed command line (flags, environment, `.env`) into the
//! concrete configuration the collector, HTTP client and writer need.

use crate::cli::Cli;
use crate::collector::CollectorConfig;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::output::{writer_for, OutputFormat, RowWriter};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the catalog endpoint
pub const BASE_URL_ENV: &str = "base_url";

/// Everything one pull needs, fully resolved
#[derive(Debug, Clone)]
pub struct Settings {
    /// Catalog endpoint, without the page parameter
    pub base_url: String,
    /// Snapshot destination
    pub output: PathBuf,
    /// Snapshot file format
    pub format: OutputFormat,
    /// Log file, appended to
    pub log_file: PathBuf,
    /// Debug-level logging
    pub verbose: bool,
    /// Attempts and delays
    pub collector: CollectorConfig,
    /// Request timeout and client options
    pub http: HttpClientConfig,
}

impl Settings {
    /// Resolve settings from the command line.
    ///
    /// Fails only when the base URL is missing or blank.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let base_url = resolve_base_url(cli.base_url.as_deref())?;

        let collector = CollectorConfig::new()
            .with_max_attempts(cli.max_attempts)
            .with_retry_delay(Duration::from_secs(cli.retry_delay))
            .with_page_delay(Duration::from_secs(cli.page_delay));

        let http = HttpClientConfig::builder()
            .timeout(Duration::from_secs(cli.timeout))
            .build();

        Ok(Self {
            base_url,
            output: cli
                .output
                .clone()
                .unwrap_or_else(|| cli.format.default_path()),
            format: cli.format,
            log_file: cli.log_file.clone(),
            verbose: cli.verbose,
            collector,
            http,
        })
    }

    /// Writer for the configured format and path
    pub fn writer(&self) -> Box<dyn RowWriter> {
        writer_for(self.format, self.output.clone())
    }
}

/// Check the configured base URL; blank counts as missing.
///
/// The URL itself is not parsed here. A malformed one fails the first page
/// request instead.
pub fn resolve_base_url(raw: Option<&str>) -> Result<String> {
    match raw.map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url.to_string()),
        _ => Err(Error::missing_field(BASE_URL_ENV)),
    }
}
