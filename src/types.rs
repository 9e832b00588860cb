//! Common types used throughout anime-snapshot
//!
//! The output row shape and the helpers that render its cells.

use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Output Row
// ============================================================================

/// Output column names, in file order
pub const COLUMNS: [&str; 6] = ["Title", "Episodes", "Rating", "Score", "Synopsis", "Genres"];

/// One flattened catalog record.
///
/// Source fields are kept exactly as the API sent them. A missing or `null`
/// field is `None` and renders as an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnimeRow {
    pub title: Option<JsonValue>,
    pub episodes: Option<JsonValue>,
    pub rating: Option<JsonValue>,
    pub score: Option<JsonValue>,
    pub synopsis: Option<JsonValue>,
    /// Genre names joined with `", "`; empty when the record has none
    pub genres: String,
}

impl AnimeRow {
    /// Cells in [`COLUMNS`] order, rendered as text
    pub fn cells(&self) -> [Option<String>; 6] {
        [
            cell_text(self.title.as_ref()),
            cell_text(self.episodes.as_ref()),
            cell_text(self.rating.as_ref()),
            cell_text(self.score.as_ref()),
            cell_text(self.synopsis.as_ref()),
            Some(self.genres.clone()),
        ]
    }
}

/// Look up a dotted path (`pagination.has_next_page`, optionally `$.`-prefixed)
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Render a pass-through JSON cell.
///
/// Strings are written verbatim; numbers and booleans use their JSON text;
/// arrays and objects become compact JSON.
pub fn cell_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
