//! Cache Reaper Task
//!
//! Background task that periodically sweeps stale entries out of the cache.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::EntryStore;

/// Spawns a background task that sweeps entries older than `ttl` every
/// `sweep_interval`.
///
/// The first sweep happens one full interval after the call. Each sweep holds
/// the store's lock for the whole scan. If a sweep overruns the interval the
/// next tick is delayed rather than fired in a burst.
///
/// The task exits when `shutdown` receives a value or its sender is dropped.
///
/// # Panics
/// Panics if `sweep_interval` is zero or if called outside a Tokio runtime.
pub fn spawn_reaper(
    store: Arc<Mutex<EntryStore>>,
    sweep_interval: Duration,
    ttl: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let mut ticker = interval_at(first_deadline(sweep_interval), sweep_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        info!(
            "Starting cache reaper with interval of {:?} and ttl of {:?}",
            sweep_interval, ttl
        );

        loop {
            tokio::select! {
                biased;
                // Ok(()) on close, Err on sender drop; both mean stop
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {
                    let (removed, remaining) = {
                        let mut guard = store.lock();
                        let removed = guard.sweep(ttl);
                        (removed, guard.len())
                    };

                    if removed > 0 {
                        info!(
                            "Cache sweep: removed {} stale entries, {} remaining",
                            removed, remaining
                        );
                    } else {
                        debug!("Cache sweep: no stale entries found");
                    }
                }
            }
        }

        info!("Cache reaper stopped");
    })
}

/// One interval from now, or a far-future instant if that overflows.
fn first_deadline(sweep_interval: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(sweep_interval).unwrap_or_else(|| now + FAR_FUTURE)
}

/// Roughly 30 years, the same horizon tokio uses for an unreachable deadline.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);
