//! Pagination module
//!
//! Page-number pagination driven by a continuation flag in the response body.
//!
//! # Overview
//!
//! The first request asks for `start_page` (1 by default). After each page the
//! paginator reads the flag at `flag_path` (`pagination.has_next_page`) and
//! either advances to the next page number or reports why it stopped.

mod paginator;
mod types;

pub use paginator::{PageNumberPaginator, DEFAULT_FLAG_PATH};
pub use types::{read_continuation, Continuation, NextPage, PaginationState, StopReason};

#[cfg(test)]
mod tests;
