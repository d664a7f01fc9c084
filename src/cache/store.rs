//! Cache Store Module
//!
//! The unsynchronized entry map. [`Cache`](super::Cache) wraps it in a mutex
//! and shares it with the reaper.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Entry Store ==
/// Key to entry mapping with lookup counters.
#[derive(Debug, Default)]
pub struct EntryStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl EntryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`, stamped with the current instant.
    ///
    /// Any key and any value are accepted, including empty ones.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.insert_entry(key, CacheEntry::new(value));
    }

    /// Inserts a pre-built entry, replacing whatever was stored under `key`.
    pub fn insert_entry(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// This never checks staleness and never touches the entry's timestamp:
    /// an entry past its TTL is still returned until a sweep removes it.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Sweep ==
    /// Removes every entry older than `ttl` as of now.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, ttl: Duration) -> usize {
        self.sweep_at(ttl, Instant::now())
    }

    /// Removes every entry older than `ttl` as of `now`.
    pub fn sweep_at(&mut self, ttl: Duration, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_stale_at(ttl, now));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Contains Key ==
    /// Checks for `key` without touching the hit/miss counters.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Length ==
    /// Returns the number of entries, stale or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
