use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use scout_core::{History, HistoryEntry};
use scout_logging::{scout_debug, scout_error, scout_info, scout_warn};
use thiserror::Error;

use crate::persist::{remove_if_exists, write_atomic, PersistError};

/// Default file name for the browsing history.
pub const HISTORY_FILENAME: &str = "recipe_history.json";

#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("failed to read history: {0}")]
    Read(#[from] io::Error),
    #[error("history is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Backing storage for the browsing history: one JSON array under one key.
pub trait HistoryStore: Send {
    /// Returns the stored entries; an absent key is an empty history.
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError>;
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryStoreError>;
    /// Removes the key entirely.
    fn clear(&self) -> Result<(), HistoryStoreError>;
}

/// History stored as a JSON file, written atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryStoreError> {
        let content = serde_json::to_string(entries)?;
        write_atomic(&self.path, &content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryStoreError> {
        remove_if_exists(&self.path)?;
        Ok(())
    }
}

/// In-memory store holding the raw JSON, like a browser's local storage slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Stored JSON, or `None` when the key is absent.
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError> {
        match self.raw() {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryStoreError> {
        let raw = serde_json::to_string(entries)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Browsing history persisted after every mutation.
///
/// All operations are synchronous and infallible from the caller's side:
/// storage failures are logged and the in-memory list stays authoritative.
pub struct HistoryCache<S: HistoryStore> {
    history: History,
    store: S,
}

impl<S: HistoryStore> HistoryCache<S> {
    /// Loads persisted entries; unreadable storage starts an empty history.
    pub fn open(store: S) -> Self {
        let history = match store.load() {
            Ok(entries) => {
                scout_info!("Loaded {} history entries", entries.len());
                History::from_entries(entries)
            }
            Err(err) => {
                scout_warn!("Failed to load browsing history: {}", err);
                History::new()
            }
        };
        Self { history, store }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add(&mut self, entry: HistoryEntry) {
        scout_debug!("History add {}", entry.slug);
        self.history.add(entry);
        self.persist();
    }

    /// Returns `true` when an entry was removed.
    pub fn remove(&mut self, slug: &str) -> bool {
        let removed = self.history.remove(slug);
        self.persist();
        removed
    }

    /// Empties storage and memory together. If storage cannot be cleared,
    /// both are left untouched and `false` is returned.
    pub fn clear(&mut self) -> bool {
        if let Err(err) = self.store.clear() {
            scout_error!("Failed to clear browsing history: {}", err);
            return false;
        }
        self.history.clear();
        true
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(self.history.entries()) {
            scout_error!("Failed to persist browsing history: {}", err);
        }
    }
}
