//! JSON page decoder

use super::rows::{row_from_record, type_name};
use crate::error::{Error, Result};
use crate::types::{lookup_path, AnimeRow};
use serde_json::Value;

/// Default location of the record list in a page
pub const DEFAULT_RECORD_PATH: &str = "data";

/// JSON decoder with record path extraction
#[derive(Debug, Clone)]
pub struct JsonDecoder {
    /// Dotted path to the record list
    record_path: String,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::with_path(DEFAULT_RECORD_PATH)
    }
}

impl JsonDecoder {
    /// Create a decoder reading records from `data`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: path.into(),
        }
    }

    /// Borrow the record list of a page.
    ///
    /// Unlike a lenient lookup, a missing path or a non-array value is an
    /// error: the page is malformed.
    pub fn records<'a>(&self, body: &'a Value) -> Result<&'a [Value]> {
        match lookup_path(body, &self.record_path) {
            Some(Value::Array(records)) => Ok(records),
            Some(other) => Err(Error::extraction(
                &self.record_path,
                format!("expected an array, found {}", type_name(other)),
            )),
            None => Err(Error::extraction(&self.record_path, "path not found")),
        }
    }

    /// Decode the records of a page one at a time, in page order.
    ///
    /// The record list itself must exist. Each item is either the entry's row
    /// or the error for an entry that could not be mapped, so callers can keep
    /// the rows produced before a malformed entry.
    pub fn decode_rows<'a>(
        &'a self,
        body: &'a Value,
    ) -> Result<impl Iterator<Item = Result<AnimeRow>> + 'a> {
        let records = self.records(body)?;
        Ok(records.iter().enumerate().map(move |(index, record)| {
            row_from_record(record).map_err(|e| {
                Error::extraction(format!("{}[{index}]", self.record_path), e.to_string())
            })
        }))
    }
}
