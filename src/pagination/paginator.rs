//! Page number pagination
//!
//! Uses a page number parameter and a boolean flag in the body:
//! - `?page=2`
//! - `{"pagination": {"has_next_page": true}}`

use super::types::{read_continuation, Continuation, NextPage, PaginationState, StopReason};
use serde_json::Value;

/// Default location of the continuation flag
pub const DEFAULT_FLAG_PATH: &str = "pagination.has_next_page";

/// Page number pagination with a continuation flag
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// First page number
    pub start_page: u32,
    /// Dotted path to the continuation flag
    pub flag_path: String,
}

impl Default for PageNumberPaginator {
    fn default() -> Self {
        Self {
            start_page: 1,
            flag_path: DEFAULT_FLAG_PATH.to_string(),
        }
    }
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(start_page: u32) -> Self {
        Self {
            start_page,
            ..Default::default()
        }
    }

    /// State positioned on the first page
    pub fn initial_state(&self) -> PaginationState {
        PaginationState::with_page(self.start_page)
    }

    /// Process a successfully extracted page and decide what comes next.
    ///
    /// The state only advances on `Continue`, so a page is never skipped or
    /// requested twice.
    pub fn process_response(&self, body: &Value, state: &mut PaginationState) -> NextPage {
        let reason = match read_continuation(body, &self.flag_path) {
            Continuation::More => {
                state.next_page();
                return NextPage::Continue { page: state.page };
            }
            Continuation::LastPage => StopReason::LastPage,
            Continuation::Missing => StopReason::FlagMissing,
        };

        NextPage::Done { reason }
    }
}
