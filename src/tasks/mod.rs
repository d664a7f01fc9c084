//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a cache is alive.
//!
//! # Tasks
//! - Reaper: sweeps stale cache entries at a fixed interval until stopped

mod reaper;

pub use reaper::spawn_reaper;
