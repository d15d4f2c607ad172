pub mod books;
pub mod cache;
pub mod categories;
pub mod client;
pub mod models;
pub mod random;
pub mod reference;
pub mod translations;

#[cfg(test)]
pub(crate) mod test_source;

use thiserror::Error;

pub use crate::cache::{FileStore, KeyValueStore, VerseCache};
pub use crate::client::{ContentClient, VerseSource};
pub use crate::reference::{Reference, VerseId};

/// Error type for the scripture resolution and retrieval layer.
#[derive(Clone, Debug, Error)]
pub enum LectioError {
    #[error("'{book}' was not found.")]
    BookNotFound { book: String },

    #[error("'{reference}' is not a valid Bible reference.")]
    InvalidReference { reference: String },

    #[error("The content service responded with status {status}. Body: {body}.")]
    ContentService { status: u16, body: String },

    #[error("Could not fetch cross references for verse {verse_id}.")]
    CrossReference {
        verse_id: i64,
        #[source]
        source: Box<LectioError>,
    },

    #[error("'{category}' is not a known category.")]
    CategoryNotFound { category: String },

    #[error("There was a transport error. Root cause: {cause}.")]
    Transport { cause: String },

    #[error("'{book}' chapter {chapter} has no verses.")]
    EmptyChapter { book: String, chapter: i32 },

    #[error("There was a cache store error. Root cause: {cause}.")]
    Store { cause: String },
}

impl From<reqwest::Error> for LectioError {
    fn from(e: reqwest::Error) -> Self {
        LectioError::Transport {
            cause: e.to_string(),
        }
    }
}
