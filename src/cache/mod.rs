//! Cache Module
//!
//! Provides an in-memory key/value store whose entries are swept out by a
//! background reaper once they exceed a fixed age.

mod entry;
mod handle;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::CacheStats;
pub use store::EntryStore;
