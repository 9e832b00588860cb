//! Response decoder module
//!
//! Turns one catalog page into output rows.
//!
//! # Overview
//!
//! [`JsonDecoder`] locates the record list inside a page body (`data` by
//! default) and maps every entry to an [`AnimeRow`](crate::types::AnimeRow).
//! Missing fields are tolerated; a structurally broken page is an error.

mod decoders;
mod rows;

pub use decoders::{JsonDecoder, DEFAULT_RECORD_PATH};
pub use rows::{row_from_record, GenreTag, RecordEntry, GENRE_SEPARATOR};
