use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::VerseSource;
use crate::models::{Book, CrossReference, Genre, Testament, Verse};
use crate::reference::VerseId;
use crate::{books, translations, LectioError};

/// In-memory [VerseSource](crate::client::VerseSource) fixture: every
/// chapter up to `max_chapter` of every known book holds verses 1..=10.
pub struct TestSource {
    /// Chapters above this come back empty (or as an error, see below).
    pub max_chapter: i32,
    /// When set, a missing chapter is a content service error instead of
    /// an empty result.
    pub fail_missing_chapters: bool,
    /// Canonical translation codes whose single-verse fetches fail.
    pub fail_translations: Vec<&'static str>,
    /// Number of retrieval calls made against this source.
    pub calls: AtomicUsize,
}

impl TestSource {
    pub fn new(max_chapter: i32) -> TestSource {
        TestSource {
            max_chapter,
            fail_missing_chapters: false,
            fail_translations: vec![],
            calls: AtomicUsize::new(0),
        }
    }

    pub fn verse_fixture(book: &str, chapter: i32, verse: i32) -> Result<Verse, LectioError> {
        let book_id = books::resolve_book_id(book)?;
        let name = books::normalize_book_name(book);
        Ok(Verse {
            id: VerseId::encode(book_id, chapter, verse).as_i64(),
            book: Book {
                id: book_id,
                name,
                testament: if book_id <= 39 {
                    Testament::Old
                } else {
                    Testament::New
                },
                genre: Genre {
                    id: 1,
                    name: "Test".to_string(),
                },
            },
            chapter_id: chapter,
            verse_id: verse,
            text: format!("Words of {} {}:{}.", book, chapter, verse),
        })
    }

    fn missing_chapter(&self) -> Result<Vec<Verse>, LectioError> {
        if self.fail_missing_chapters {
            Err(LectioError::ContentService {
                status: 404,
                body: "no such chapter".to_string(),
            })
        } else {
            Ok(vec![])
        }
    }
}

#[async_trait]
impl VerseSource for TestSource {
    async fn chapter(
        &self,
        book: &str,
        chapter: i32,
        _translation: Option<&str>,
    ) -> Result<Vec<Verse>, LectioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        books::resolve_book_id(book)?;
        if chapter > self.max_chapter {
            return self.missing_chapter();
        }
        (1..=10)
            .map(|v| TestSource::verse_fixture(book, chapter, v))
            .collect()
    }

    async fn verse(
        &self,
        book: &str,
        chapter: i32,
        verse: i32,
        translation: Option<&str>,
    ) -> Result<Verse, LectioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let code = translations::normalize(translation);
        if self.fail_translations.iter().any(|t| *t == code) {
            return Err(LectioError::ContentService {
                status: 500,
                body: format!("translation {} unavailable", code),
            });
        }
        TestSource::verse_fixture(book, chapter, verse)
    }

    async fn search(
        &self,
        _query: &str,
        _translation: Option<&str>,
        _limit: i64,
        _offset: i64,
    ) -> Result<Vec<Verse>, LectioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![TestSource::verse_fixture("Psalms", 119, 105)?])
    }

    async fn cross_references(
        &self,
        book: &str,
        chapter: i32,
        verse: i32,
        _translation: Option<&str>,
    ) -> Result<Vec<CrossReference>, LectioError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let related = TestSource::verse_fixture(book, chapter, verse)?;
        Ok(vec![CrossReference {
            id: related.id,
            book: related.book,
            chapter_id: related.chapter_id,
            verse_id: related.verse_id,
            text: related.text,
        }])
    }
}
