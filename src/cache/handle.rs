//! Expiring Cache Handle
//!
//! Wires the entry store to its reaper and exposes the public cache surface.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, EntryStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::spawn_reaper;

// == Cache ==
/// A concurrency-safe key/value store whose entries expire by age.
///
/// All access goes through one mutex, shared with a background reaper that
/// sweeps the store every `sweep_interval` and drops entries older than the
/// TTL. Lookups never check age themselves, so an entry may be returned for up
/// to one extra interval after its TTL has passed. With the default coupling
/// (TTL equals the interval) an entry written at `t` is present at `t` and
/// gone by `t + 2I`.
///
/// The reaper stops when [`close`](Self::close) or
/// [`shutdown`](Self::shutdown) is called, or when the cache is dropped.
///
/// # Example
/// ```ignore
/// let cache = Cache::new(Duration::from_secs(5));
/// cache.add("https://pokeapi.co/api/v2/location-area/", body);
/// if let Some(cached) = cache.get("https://pokeapi.co/api/v2/location-area/") {
///     // ...
/// }
/// cache.shutdown().await;
/// ```
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<EntryStore>>,
    config: CacheConfig,
    shutdown: watch::Sender<bool>,
    reaper: Option<JoinHandle<()>>,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache whose TTL equals `sweep_interval` and starts its reaper.
    ///
    /// # Panics
    /// Panics if `sweep_interval` is zero or if called outside a Tokio runtime.
    pub fn new(sweep_interval: Duration) -> Self {
        assert!(
            !sweep_interval.is_zero(),
            "cache sweep interval must be greater than zero"
        );
        Self::start(CacheConfig::new(sweep_interval))
    }

    /// Creates a cache from a validated config and starts its reaper.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn from_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config))
    }

    fn start(config: CacheConfig) -> Self {
        let store = Arc::new(Mutex::new(EntryStore::new()));
        let (shutdown, shutdown_rx) = watch::channel(false);

        let handle = spawn_reaper(
            store.clone(),
            config.sweep_interval,
            config.effective_ttl(),
            shutdown_rx,
        );

        Self {
            store,
            config,
            shutdown,
            reaper: Some(handle),
        }
    }

    // == Add ==
    /// Inserts or overwrites the entry for `key`, stamped with the current time.
    ///
    /// Overwriting replaces both value and timestamp, so the entry's expiry
    /// restarts from now.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.store.lock().add(key.into(), value.into());
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, if any.
    ///
    /// Does not refresh the entry and does not evict it. Entries past their
    /// TTL remain visible until the next sweep.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().get(key)
    }

    // == Inspection ==
    /// Returns the number of entries, including stale ones not yet swept.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    /// Period between reaper sweeps.
    pub fn sweep_interval(&self) -> Duration {
        self.config.sweep_interval
    }

    /// Age threshold the reaper evicts at.
    pub fn ttl(&self) -> Duration {
        self.config.effective_ttl()
    }

    // == Lifecycle ==
    /// Signals the reaper to stop. Idempotent.
    ///
    /// The store stays usable afterwards, but nothing expires any more.
    pub fn close(&self) {
        if !self.shutdown.send_replace(true) {
            debug!("Cache closed, reaper signalled to stop");
        }
    }

    /// Returns true once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Returns true while the reaper task has not exited.
    pub fn is_reaper_running(&self) -> bool {
        self.reaper
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the reaper and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.close();

        if let Some(handle) = self.reaper.take() {
            if let Err(err) = handle.await {
                warn!("Cache reaper ended abnormally: {}", err);
            }
        }
    }
}
