//! Error types for anime-snapshot
//!
//! Every fallible operation in the crate returns `Result<T, Error>`.
//! The collector decides per variant whether a failure is retried
//! ([`Error::is_transient`]) or ends pagination; only configuration
//! errors ever reach the process exit code.

use thiserror::Error;

/// The main error type for anime-snapshot
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({attempts}) reached for page {page}: {source}")]
    RetriesExhausted {
        page: u32,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to extract records from path '{path}': {message}")]
    RecordExtraction { path: String, message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a record extraction error
    pub fn extraction(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Wrap the last transient failure of a page whose attempts ran out
    pub fn retries_exhausted(page: u32, attempts: u32, last: Error) -> Self {
        Self::RetriesExhausted {
            page,
            attempts,
            source: Box::new(last),
        }
    }

    /// Check if this error is a transient network failure worth another attempt.
    ///
    /// Only connection failures and timeouts qualify. Status codes, parse
    /// failures and malformed pages are never retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::Timeout { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for anime-snapshot
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
