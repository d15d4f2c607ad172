use serde_derive::{Deserialize, Serialize};

/// Model representing a Bible verse as returned by the content service.
///
/// A verse is immutable once retrieved; it is cached, never edited.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// Canonical verse id (see [VerseId](crate::reference::VerseId)).
    pub id: i64,
    pub book: Book,
    pub chapter_id: i32,
    pub verse_id: i32,
    pub text: String,
}

/// Enum for the testaments in the Bible (Old or New).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Testament {
    Old,
    New,
}

/// Model representing a book in the Bible.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub testament: Testament,
    pub genre: Genre,
}

/// Model representing a book genre (e.g. "Law", "Gospels").
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Model representing an available Bible translation.
///
/// Reference data fetched once per session and never mutated.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: i32,
    pub abbreviation: String,
    pub language: String,
    pub display_name: String,
    pub info_url: String,
}

/// Model representing a verse related to another verse.
///
/// The relations endpoint returns one inner list per cross-reference
/// source; the client flattens them before they reach a caller.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReference {
    pub id: i64,
    pub book: Book,
    pub chapter_id: i32,
    pub verse_id: i32,
    pub text: String,
}
