use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use log::{debug, warn};

use crate::client::VerseSource;
use crate::models::Verse;
use crate::{books, LectioError};

/// Store key under which the aggregate verse cache record is persisted.
pub const CACHE_STORE_KEY: &str = "verse_cache";

/// A simple string-keyed, string-valued persistent store.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, LectioError>;
    fn write(&self, key: &str, value: &str) -> Result<(), LectioError>;
}

/// File-backed store: one file per key under a root directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> FileStore {
        FileStore { root: root.into() }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, LectioError> {
        match fs::read_to_string(self.root.join(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LectioError::Store {
                cause: e.to_string(),
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), LectioError> {
        fs::create_dir_all(&self.root).map_err(|e| LectioError::Store {
            cause: e.to_string(),
        })?;
        fs::write(self.root.join(key), value).map_err(|e| LectioError::Store {
            cause: e.to_string(),
        })
    }
}

/// Builds the cache key for a single verse: the resolved reference string
/// from the normalized book name, so different spellings of the same
/// reference share one entry. The key does not encode the translation.
pub fn reference_key(book: &str, chapter: i32, verse: i32) -> String {
    format!("{} {}:{}", books::normalize_book_name(book), chapter, verse)
}

/// Persisted, reference-keyed cache of previously retrieved verses.
///
/// The whole aggregate record is loaded once at startup and rewritten on
/// every successful single-verse fetch. Entries are never evicted.
pub struct VerseCache<S: KeyValueStore> {
    store: S,
    entries: Mutex<HashMap<String, Verse>>,
}

impl<S: KeyValueStore> VerseCache<S> {
    /// Loads the persisted aggregate record. A missing or unreadable
    /// record starts an empty cache.
    pub fn load(store: S) -> VerseCache<S> {
        let entries = match store.read(CACHE_STORE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Discarding unreadable verse cache record: {}", e);
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!("Could not read verse cache record: {}", e);
                HashMap::new()
            }
        };

        VerseCache {
            store,
            entries: Mutex::new(entries),
        }
    }

    pub fn get(&self, key: &str) -> Option<Verse> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Inserts a verse and immediately rewrites the whole aggregate
    /// record. The lock is held through the write so concurrent
    /// read-modify-write cycles cannot lose an update.
    pub fn put(&self, key: &str, verse: &Verse) -> Result<(), LectioError> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), verse.clone());
        let raw = serde_json::to_string(&*entries).map_err(|e| LectioError::Store {
            cause: e.to_string(),
        })?;
        self.store.write(CACHE_STORE_KEY, &raw)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cache-first single-verse lookup: a reference resolved before is
    /// answered from memory with no network call; otherwise the verse is
    /// fetched and written through on success.
    pub async fn lookup<V>(
        &self,
        source: &V,
        book: &str,
        chapter: i32,
        verse: i32,
        translation: Option<&str>,
    ) -> Result<Verse, LectioError>
    where
        V: VerseSource + ?Sized,
    {
        let key = reference_key(book, chapter, verse);
        if let Some(hit) = self.get(&key) {
            debug!("Verse cache hit for {}", key);
            return Ok(hit);
        }

        let fetched = source.verse(book, chapter, verse, translation).await?;
        self.put(&key, &fetched)?;
        Ok(fetched)
    }
}
