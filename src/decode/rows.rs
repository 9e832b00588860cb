//! Record entry to row mapping

use crate::types::{AnimeRow, JsonValue};
use serde::{de::Error as _, Deserialize};

/// Separator between genre names in the Genres column
pub const GENRE_SEPARATOR: &str = ", ";

/// Shape of one record entry as the API sends it.
///
/// Every field is optional and unknown fields are ignored. Scalar fields are
/// kept as raw JSON so upstream type drift passes through untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordEntry {
    pub title: Option<JsonValue>,
    pub episodes: Option<JsonValue>,
    pub rating: Option<JsonValue>,
    pub score: Option<JsonValue>,
    pub synopsis: Option<JsonValue>,
    pub genres: Option<Vec<GenreTag>>,
}

/// A named genre tag
#[derive(Debug, Clone, Deserialize)]
pub struct GenreTag {
    pub name: String,
}

impl From<RecordEntry> for AnimeRow {
    fn from(entry: RecordEntry) -> Self {
        let genres = entry
            .genres
            .unwrap_or_default()
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(GENRE_SEPARATOR);

        Self {
            title: entry.title,
            episodes: entry.episodes,
            rating: entry.rating,
            score: entry.score,
            synopsis: entry.synopsis,
            genres,
        }
    }
}

/// Map one record entry to a row.
///
/// Fails when the entry is not an object, `genres` is not a list, or a genre
/// tag has no string `name`.
pub fn row_from_record(record: &JsonValue) -> serde_json::Result<AnimeRow> {
    if !record.is_object() {
        return Err(serde_json::Error::custom(format!(
            "expected a record object, found {}",
            type_name(record)
        )));
    }
    RecordEntry::deserialize(record).map(AnimeRow::from)
}

pub(crate) fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
