//! Run logging
//!
//! The collector and runner report through a [`RunLog`] handed to them
//! instead of calling a global logger. Production code uses [`TracingLog`],
//! which forwards to `tracing`; tests use [`MemoryLog`] to assert on what was
//! reported.
//!
//! [`init`] installs the process subscriber: console plus an optional log
//! file, both with local timestamps.

use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Log level for run events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// General information
    Info,
    /// Recoverable problem
    Warn,
    /// Failure that ended part of the run
    Error,
}

/// Logging capability used by the collector and runner
pub trait RunLog: Send + Sync {
    /// Report progress
    fn info(&self, message: &str);

    /// Report a recoverable problem
    fn warn(&self, message: &str);

    /// Report a failure
    fn error(&self, message: &str);
}

/// [`RunLog`] that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl RunLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// One captured log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Level it was reported at
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// [`RunLog`] that keeps every entry in memory
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log behind an `Arc`, ready to share with a collector
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Snapshot of all entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Messages logged at `level`, oldest first
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Number of entries at `level`
    pub fn count(&self, level: LogLevel) -> usize {
        self.lock().iter().filter(|e| e.level == level).count()
    }

    /// Whether any entry contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|e| e.message.contains(needle))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lock().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A panic while holding the lock cannot leave the Vec half-written
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RunLog for MemoryLog {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

/// Install the global subscriber.
///
/// Writes to stderr and, when `log_file` is given, appends to that file
/// (creating its directory). `RUST_LOG` overrides the default filter.
pub fn init(log_file: Option<&Path>, verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = ChronoLocal::new(TIMESTAMP_FORMAT.to_string());

    let console = fmt::layer()
        .with_target(false)
        .with_timer(timer.clone())
        .with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_timer(timer)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
