use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::storage::KeyValueStore;

pub const HISTORY_KEY: &str = "storyHistory";
pub const HISTORY_CAPACITY: usize = 6;

/// One generated story. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub words: String,
    pub story: String,
    #[serde(rename = "date", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Most-recent-first, never longer than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push_front(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }
}

/// Bounded story log persisted under [`HISTORY_KEY`].
pub struct HistoryStore<S> {
    storage: S,
    log: HistoryLog,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Reads the persisted log right away.
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            storage,
            log: HistoryLog::default(),
        };
        store.load();
        store
    }

    /// Never fails: absent or malformed data yields an empty log.
    pub fn load(&mut self) -> HistoryLog {
        self.log = match self.storage.get(HISTORY_KEY) {
            None => HistoryLog::default(),
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => HistoryLog::from_entries(entries),
                Err(e) => {
                    warn!(error = %e, "discarding malformed story history");
                    HistoryLog::default()
                }
            },
        };
        self.log.clone()
    }

    pub fn append(&mut self, words: &str, story: &str) -> HistoryLog {
        self.append_at(words, story, Utc::now())
    }

    pub fn append_at(&mut self, words: &str, story: &str, created_at: DateTime<Utc>) -> HistoryLog {
        self.log.push_front(HistoryEntry {
            words: words.to_string(),
            story: story.to_string(),
            created_at,
        });

        self.persist();
        self.log.clone()
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Failure only costs durability; the session keeps the updated log.
    fn persist(&mut self) {
        let json = match serde_json::to_string(self.log.entries()) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize story history");
                return;
            }
        };

        match self.storage.set(HISTORY_KEY, &json) {
            Ok(()) => debug!(entries = self.log.len(), "story history saved"),
            Err(e) => warn!(error = %e, "story history not persisted"),
        }
    }
}
