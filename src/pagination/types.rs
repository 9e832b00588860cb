//! Pagination types
//!
//! State tracked across pages and the result of checking a response.

use crate::types::lookup_path;
use serde_json::Value;

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available; fetch this page number next
    Continue {
        /// Page number to request
        page: u32,
    },
    /// No more pages
    Done {
        /// Why pagination stopped
        reason: StopReason,
    },
}

/// Why pagination ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The API reported no further pages
    LastPage,
    /// The continuation flag was absent or not a boolean; read as false
    FlagMissing,
}

/// Value of the continuation flag in one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// `true`
    More,
    /// `false`
    LastPage,
    /// Absent, `null`, or not a boolean
    Missing,
}

/// Read the continuation flag at `path`
pub fn read_continuation(body: &Value, path: &str) -> Continuation {
    match lookup_path(body, path).and_then(Value::as_bool) {
        Some(true) => Continuation::More,
        Some(false) => Continuation::LastPage,
        None => Continuation::Missing,
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Page number to request next
    pub page: u32,
}

impl PaginationState {
    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self { page }
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }
}
