//! Row to Arrow conversion
//!
//! Every column is nullable UTF-8. Cells hold the text rendering of the source
//! value so the snapshot never coerces what the API sent.

use crate::error::Result;
use crate::types::{AnimeRow, COLUMNS};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Arrow schema of the output table, in [`COLUMNS`] order
pub fn row_schema() -> Schema {
    let fields: Vec<Field> = COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, true))
        .collect();
    Schema::new(fields)
}

/// Convert rows to a single RecordBatch, preserving row order
pub fn rows_to_batch(rows: &[AnimeRow]) -> Result<RecordBatch> {
    let mut columns: [Vec<Option<String>>; 6] = Default::default();
    for column in &mut columns {
        column.reserve(rows.len());
    }

    for row in rows {
        for (column, cell) in columns.iter_mut().zip(row.cells()) {
            column.push(cell);
        }
    }

    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();

    Ok(RecordBatch::try_new(Arc::new(row_schema()), arrays)?)
}
