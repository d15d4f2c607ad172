use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Match, Regex};
use serde_derive::Serialize;

use crate::LectioError;

/// Model representing a Bible reference used to address verses.
///
/// The same shape serves both parser output (where `book` is still the raw
/// user text) and a resolved reference (where `book` is canonical). A
/// `verses` of `None` addresses a whole chapter; a range with equal ends
/// addresses a single verse.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reference {
    pub book: String,
    pub chapter: i32,
    pub verses: Option<RangeInclusive<i32>>,
}

impl Reference {
    /// Builds a whole-chapter reference directly, as the step-by-step
    /// chooser input does, bypassing the text grammar entirely.
    pub fn whole_chapter(book: &str, chapter: i32) -> Self {
        Reference {
            book: book.to_string(),
            chapter,
            verses: None,
        }
    }

    /// Builds a single-verse reference directly.
    pub fn single_verse(book: &str, chapter: i32, verse: i32) -> Self {
        Reference {
            book: book.to_string(),
            chapter,
            verses: Some(verse..=verse),
        }
    }

    /// Builds an inclusive verse-range reference directly.
    pub fn verse_range(book: &str, chapter: i32, start: i32, end: i32) -> Self {
        Reference {
            book: book.to_string(),
            chapter,
            verses: Some(start..=end),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Reference {
                book,
                chapter,
                verses: None,
            } => write!(f, "{} {}", book, chapter),
            Reference {
                book,
                chapter,
                verses: Some(verses),
            } => {
                if verses.start() == verses.end() {
                    write!(f, "{} {}:{}", book, chapter, verses.start())
                } else {
                    write!(f, "{} {}:{}-{}", book, chapter, verses.start(), verses.end())
                }
            }
        }
    }
}

impl FromStr for Reference {
    type Err = LectioError;

    /// Parses the grammar `<book> <chapter>[:<verse>[-<verse>]]`.
    ///
    /// The book portion is greedy and may contain internal spaces and a
    /// leading digit ("1 Corinthians 3" parses as book "1 Corinthians",
    /// chapter 3). The whole string is anchored; trailing garbage is
    /// rejected.
    fn from_str(s: &str) -> Result<Reference, Self::Err> {
        lazy_static! {
            static ref REF_RE: Regex = Regex::new(
                r"^(\d?\s?[A-Za-z]+(?:\s[A-Za-z]+)*)\s+(\d{1,3})(?::(\d{1,3})(?:-(\d{1,3}))?)?$"
            )
            .unwrap();
        }

        let caps = REF_RE
            .captures(s.trim())
            .ok_or_else(|| invalid_reference(s))?;

        let book = caps
            .get(1)
            .ok_or_else(|| invalid_reference(s))?
            .as_str()
            .to_string();
        let chapter = parse_num_match(caps.get(2).ok_or_else(|| invalid_reference(s))?)?;

        let verses = match (caps.get(3), caps.get(4)) {
            (None, _) => None,
            (Some(start), None) => {
                let start = parse_num_match(start)?;
                Some(start..=start)
            }
            (Some(start), Some(end)) => Some(parse_num_match(start)?..=parse_num_match(end)?),
        };

        Ok(Reference {
            book,
            chapter,
            verses,
        })
    }
}

/// Parse a [Match](regex::Match) into an i32.
fn parse_num_match(m: Match) -> Result<i32, LectioError> {
    m.as_str()
        .parse()
        .map_err(|_| invalid_reference(m.as_str()))
}

/// Create an invalid reference error from the input.
fn invalid_reference(s: &str) -> LectioError {
    LectioError::InvalidReference {
        reference: s.to_string(),
    }
}

/// A canonical verse id: the book id concatenated with the chapter and
/// verse numbers, each zero-padded to exactly three digits ("John 3:16" is
/// 43003016). Only defined for chapter and verse in [1, 999]; the value is
/// an opaque address for verse-level lookups, never shown to users.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VerseId(i64);

impl VerseId {
    /// Encodes a (book, chapter, verse) triple.
    ///
    /// The multiplications line up with the padded-concatenation form
    /// because chapter and verse never exceed three digits; the tests hold
    /// this equivalence against the string encoding.
    pub fn encode(book: i32, chapter: i32, verse: i32) -> VerseId {
        VerseId(i64::from(book) * 1_000_000 + i64::from(chapter) * 1_000 + i64::from(verse))
    }

    /// Splits a canonical id back into its (book, chapter, verse) triple.
    pub fn decode(self) -> (i32, i32, i32) {
        (
            (self.0 / 1_000_000) as i32,
            ((self.0 / 1_000) % 1_000) as i32,
            (self.0 % 1_000) as i32,
        )
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
