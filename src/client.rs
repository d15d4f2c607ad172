use std::env;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_derive::Serialize;

use crate::models::{Book, CrossReference, Genre, Translation, Verse};
use crate::reference::{Reference, VerseId};
use crate::{books, translations, LectioError};

/// Environment variable naming the content service base URL.
pub const CONTENT_API_URL_VAR: &str = "CONTENT_API_URL";

/// Trait implemented by types that can retrieve Bible structures from a
/// content source.
///
/// The range and free-text operations are provided on top of the required
/// ones, so every source gets the same passage semantics.
#[async_trait]
pub trait VerseSource: Send + Sync {
    /// Fetches a whole chapter. Verse ordering is whatever the source
    /// returns; callers must not assume more than that.
    async fn chapter(
        &self,
        book: &str,
        chapter: i32,
        translation: Option<&str>,
    ) -> Result<Vec<Verse>, LectioError>;

    /// Fetches a single verse by its canonical address.
    async fn verse(
        &self,
        book: &str,
        chapter: i32,
        verse: i32,
        translation: Option<&str>,
    ) -> Result<Verse, LectioError>;

    /// Free-text search, with the source's own pagination semantics.
    async fn search(
        &self,
        query: &str,
        translation: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Verse>, LectioError>;

    /// Fetches verses related to the given verse, flattened to one list.
    async fn cross_references(
        &self,
        book: &str,
        chapter: i32,
        verse: i32,
        translation: Option<&str>,
    ) -> Result<Vec<CrossReference>, LectioError>;

    /// Fetches an inclusive verse range by fetching the whole chapter and
    /// filtering client-side. One request serves any sub-range, at the
    /// cost of over-fetching small ranges in long chapters.
    async fn passage(
        &self,
        book: &str,
        chapter: i32,
        start: i32,
        end: Option<i32>,
        translation: Option<&str>,
    ) -> Result<Vec<Verse>, LectioError> {
        let end = end.unwrap_or(start);
        let verses = self.chapter(book, chapter, translation).await?;
        Ok(verses
            .into_iter()
            .filter(|v| v.verse_id >= start && v.verse_id <= end)
            .collect())
    }

    /// Parses a free-text reference and retrieves it: a bare chapter
    /// reference yields the whole chapter, a single verse a one-element
    /// list, and a range the filtered passage.
    async fn by_reference(
        &self,
        text: &str,
        translation: Option<&str>,
    ) -> Result<Vec<Verse>, LectioError> {
        let reference: Reference = text.parse()?;
        match reference.verses {
            None => {
                self.chapter(&reference.book, reference.chapter, translation)
                    .await
            }
            Some(range) => {
                self.passage(
                    &reference.book,
                    reference.chapter,
                    *range.start(),
                    Some(*range.end()),
                    translation,
                )
                .await
            }
        }
    }
}

/// HTTP implementation of [VerseSource](VerseSource) against the content
/// service.
pub struct ContentClient {
    http: Client,
    base_url: String,
}

impl ContentClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: &str) -> ContentClient {
        ContentClient {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client from the `CONTENT_API_URL` environment variable.
    pub fn from_env() -> ContentClient {
        let base_url = env::var(CONTENT_API_URL_VAR)
            .unwrap_or_else(|_| panic!("{} must be set", CONTENT_API_URL_VAR));
        ContentClient::new(&base_url)
    }

    /// Lists the available translations.
    pub async fn translations(&self) -> Result<Vec<Translation>, LectioError> {
        self.get_json("/translations").await
    }

    /// Fetches one translation by id.
    pub async fn translation(&self, id: i32) -> Result<Translation, LectioError> {
        self.get_json(&format!("/translations/{}", id)).await
    }

    /// Lists all books known to the content service.
    pub async fn books(&self) -> Result<Vec<Book>, LectioError> {
        self.get_json("/books").await
    }

    /// Fetches one book's metadata by id.
    pub async fn book(&self, book_id: i32) -> Result<Book, LectioError> {
        self.get_json(&format!("/books/{}", book_id)).await
    }

    /// Lists the book genres.
    pub async fn genres(&self) -> Result<Vec<Genre>, LectioError> {
        self.get_json("/genres").await
    }

    /// Fetches one genre by id.
    pub async fn genre(&self, id: i32) -> Result<Genre, LectioError> {
        self.get_json(&format!("/genres/{}", id)).await
    }

    async fn get_json<T>(&self, path_and_query: &str) -> Result<T, LectioError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LectioError::ContentService { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl VerseSource for ContentClient {
    async fn chapter(
        &self,
        book: &str,
        chapter: i32,
        translation: Option<&str>,
    ) -> Result<Vec<Verse>, LectioError> {
        let book_id = books::resolve_book_id(book)?;
        let translation = translations::normalize(translation);
        self.get_json(&format!(
            "/books/{}/chapters/{}?translation={}",
            book_id, chapter, translation
        ))
        .await
    }

    async fn verse(
        &self,
        book: &str,
        chapter: i32,
        verse: i32,
        translation: Option<&str>,
    ) -> Result<Verse, LectioError> {
        let book_id = books::resolve_book_id(book)?;
        let translation = translations::normalize(translation);
        let verse_id = VerseId::encode(book_id, chapter, verse);
        self.get_json(&format!(
            "/books/{}/chapters/{}/{}?translation={}",
            book_id, chapter, verse_id, translation
        ))
        .await
    }

    async fn search(
        &self,
        query: &str,
        translation: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Verse>, LectioError> {
        let translation = translations::normalize(translation);
        let url = format!("{}/search", self.base_url);
        debug!("GET {} query={:?}", url, query);

        let limit = limit.to_string();
        let offset = offset.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("translation", translation.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LectioError::ContentService { status, body });
        }

        Ok(response.json().await?)
    }

    async fn cross_references(
        &self,
        book: &str,
        chapter: i32,
        verse: i32,
        translation: Option<&str>,
    ) -> Result<Vec<CrossReference>, LectioError> {
        let book_id = books::resolve_book_id(book)?;
        let translation = translations::normalize(translation);
        let verse_id = VerseId::encode(book_id, chapter, verse);

        // The relations endpoint nests one inner list per cross-reference
        // source; flatten before anything downstream sees it.
        let nested: Vec<Vec<CrossReference>> = self
            .get_json(&format!(
                "/verse/{}/relations?translation={}",
                verse_id, translation
            ))
            .await
            .map_err(|e| LectioError::CrossReference {
                verse_id: verse_id.as_i64(),
                source: Box::new(e),
            })?;

        Ok(nested.into_iter().flatten().collect())
    }
}

/// Per-translation result of a comparison fan-out. `verse` is `None` when
/// that translation's request failed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerseComparison {
    pub translation: String,
    pub verse: Option<Verse>,
}

/// Fetches the same verse in several translations as independent requests
/// joined when all complete. A failing translation is marked unavailable in
/// its own slot and never fails the others; only an unresolvable book fails
/// the whole comparison.
pub async fn compare_translations<S>(
    source: &S,
    book: &str,
    chapter: i32,
    verse: i32,
    codes: &[&str],
) -> Result<Vec<VerseComparison>, LectioError>
where
    S: VerseSource + ?Sized,
{
    let book_id = books::resolve_book_id(book)?;
    let book_name = books::book_name(book_id).unwrap_or(book).to_string();

    let fetches = codes.iter().map(|&code| {
        let book_name = book_name.clone();
        async move {
            let translation = translations::normalize(Some(code));
            match source.verse(&book_name, chapter, verse, Some(code)).await {
                Ok(v) => VerseComparison {
                    translation,
                    verse: Some(v),
                },
                Err(e) => {
                    warn!(
                        "Translation {} unavailable for {} {}:{}: {}",
                        translation, book_name, chapter, verse, e
                    );
                    VerseComparison {
                        translation,
                        verse: None,
                    }
                }
            }
        }
    });

    Ok(join_all(fetches).await)
}
