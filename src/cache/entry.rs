//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload together with the instant it was written.
///
/// Entries are never mutated in place: an overwrite replaces the whole entry,
/// which resets its age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// Instant the entry was added or last overwritten
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self::new_at(value, Instant::now())
    }

    /// Creates a new entry stamped with an explicit instant.
    pub fn new_at(value: Vec<u8>, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long the entry has existed as of `now`.
    ///
    /// Saturates to zero if `now` is earlier than the creation instant.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age equals `ttl` exactly is still
    /// fresh. Only a strictly greater age makes it stale.
    pub fn is_stale_at(&self, ttl: Duration, now: Instant) -> bool {
        self.age_at(now) > ttl
    }
}
