use crate::HistoryEntry;

/// Maximum number of recently viewed recipes kept.
pub const HISTORY_CAPACITY: usize = 30;

/// Bounded, newest-first list of recently viewed recipes, unique by slug.
///
/// This is the pure half of the browsing history; persistence lives in
/// `scout_engine::HistoryCache`, which wraps a `History` and writes it out after
/// every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a history from persisted entries, keeping the first occurrence
    /// of each slug and dropping anything past capacity.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            if history.entries.len() >= HISTORY_CAPACITY {
                break;
            }
            if !history.contains(&entry.slug) {
                history.entries.push(entry);
            }
        }
        history
    }

    /// Moves or inserts `entry` at the front and evicts the oldest beyond capacity.
    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.retain(|existing| existing.slug != entry.slug);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Returns `true` when an entry was removed.
    pub fn remove(&mut self, slug: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.slug != slug);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entries.iter().any(|entry| entry.slug == slug)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
