use std::fs;

use pretty_assertions::assert_eq;
use scout_core::{Dish, HistoryEntry, HISTORY_CAPACITY};
use scout_engine::{
    HistoryCache, HistoryStore, HistoryStoreError, JsonFileStore, MemoryStore, PersistError,
    HISTORY_FILENAME,
};
use tempfile::TempDir;

fn entry(slug: &str) -> HistoryEntry {
    HistoryEntry {
        id: slug.len() as u64,
        slug: slug.to_string(),
        title: format!("Recipe {slug}"),
        channel_name: None,
        thumbnail_url: None,
        cooking_time: None,
        dish: Dish::default(),
    }
}

fn slugs(entries: &[HistoryEntry]) -> Vec<String> {
    entries.iter().map(|e| e.slug.clone()).collect()
}

/// A store whose writes always fail, as a full or read-only disk would.
struct BrokenStore;

impl HistoryStore for BrokenStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryStoreError> {
        Err(PersistError::StorageDir("unavailable".to_string()).into())
    }

    fn save(&self, _entries: &[HistoryEntry]) -> Result<(), HistoryStoreError> {
        Err(PersistError::StorageDir("unavailable".to_string()).into())
    }

    fn clear(&self) -> Result<(), HistoryStoreError> {
        Err(PersistError::StorageDir("unavailable".to_string()).into())
    }
}

#[test]
fn every_mutation_is_persisted() {
    let mut cache = HistoryCache::open(MemoryStore::new());
    assert!(cache.is_empty());
    assert_eq!(cache.store().raw(), None);

    cache.add(entry("a"));
    cache.add(entry("b"));
    let stored: Vec<HistoryEntry> = serde_json::from_str(&cache.store().raw().unwrap()).unwrap();
    assert_eq!(slugs(&stored), vec!["b", "a"]);

    assert!(cache.remove("a"));
    let stored: Vec<HistoryEntry> = serde_json::from_str(&cache.store().raw().unwrap()).unwrap();
    assert_eq!(slugs(&stored), vec!["b"]);
    assert!(!cache.remove("missing"));
}

#[test]
fn re_adding_dedupes_by_slug() {
    let mut cache = HistoryCache::open(MemoryStore::new());
    for slug in ["a", "b", "c", "a"] {
        cache.add(entry(slug));
    }
    assert_eq!(slugs(cache.entries()), vec!["a", "c", "b"]);
}

#[test]
fn capacity_drops_oldest() {
    let mut cache = HistoryCache::open(MemoryStore::new());
    for i in 0..HISTORY_CAPACITY + 5 {
        cache.add(entry(&format!("r{i}")));
    }
    assert_eq!(cache.len(), HISTORY_CAPACITY);
    assert_eq!(cache.entries()[0].slug, format!("r{}", HISTORY_CAPACITY + 4));
    assert!(!cache.entries().iter().any(|e| e.slug == "r4"));
}

#[test]
fn clear_empties_memory_and_storage() {
    let mut cache = HistoryCache::open(MemoryStore::new());
    cache.add(entry("a"));
    assert!(cache.clear());
    assert!(cache.is_empty());
    assert_eq!(cache.store().raw(), None);
}

#[test]
fn corrupt_storage_starts_empty() {
    let cache = HistoryCache::open(MemoryStore::with_raw("{not json"));
    assert!(cache.is_empty());
}

#[test]
fn storage_failures_are_not_fatal() {
    scout_logging::initialize_for_tests();
    let mut cache = HistoryCache::open(BrokenStore);
    assert!(cache.is_empty());

    cache.add(entry("a"));
    cache.add(entry("b"));
    assert_eq!(slugs(cache.entries()), vec!["b", "a"]);

    assert!(cache.remove("a"));
    assert!(!cache.clear());
    assert_eq!(slugs(cache.entries()), vec!["b"]);
}

#[test]
fn json_file_round_trips_across_sessions() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(HISTORY_FILENAME);

    let mut cache = HistoryCache::open(JsonFileStore::new(&path));
    cache.add(entry("a"));
    cache.add(entry("b"));
    drop(cache);

    let mut reopened = HistoryCache::open(JsonFileStore::new(&path));
    assert_eq!(slugs(reopened.entries()), vec!["b", "a"]);

    assert!(reopened.clear());
    assert!(!path.exists());
    assert!(HistoryCache::open(JsonFileStore::new(&path)).is_empty());
}

#[test]
fn stored_file_with_duplicates_is_normalized_on_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(HISTORY_FILENAME);
    let raw = serde_json::to_string(&vec![entry("a"), entry("b"), entry("a")]).unwrap();
    fs::write(&path, raw).unwrap();

    let cache = HistoryCache::open(JsonFileStore::new(&path));
    assert_eq!(slugs(cache.entries()), vec!["a", "b"]);
}
