//! Output module
//!
//! Persists the collected rows.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting rows to an Arrow RecordBatch with the fixed column layout
//! - Writing that batch as CSV (the default snapshot format)
//! - Writing it as Parquet

mod schema;
mod writer;

pub use schema::{row_schema, rows_to_batch};
pub use writer::{
    create_parent_dir, writer_for, CsvRowWriter, OutputFormat, ParquetRowWriter, RowWriter,
};
