//! CLI module
//!
//! Command-line interface for pulling a catalog snapshot.
//!
//! A run resolves [`crate::config::Settings`], collects every page it can,
//! then writes whatever was collected. Only a missing base URL makes
//! [`Runner::run`] return an error.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{persist, RunReport, Runner, WriteStatus};
