//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store semantics over arbitrary keys, values and
//! entry ages.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::{CacheEntry, EntryStore};

// == Strategies ==
/// Any key, including the empty string and non-ASCII text
fn key_strategy() -> impl Strategy<Value = String> {
    ".{0,32}"
}

/// Any byte payload, including empty ones
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..128)
}

#[derive(Debug, Clone)]
enum StoreOp {
    Add { key: String, value: Vec<u8> },
    Get { key: String },
}

/// Small key space so adds and gets collide often
fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    let key = "[a-d]{1,2}";
    prop_oneof![
        (key, value_strategy()).prop_map(|(key, value)| StoreOp::Add { key, value }),
        key.prop_map(|key| StoreOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Add followed by get returns the exact payload.
    #[test]
    fn prop_write_then_read(key in key_strategy(), value in value_strategy()) {
        let mut store = EntryStore::new();

        store.add(key.clone(), value.clone());

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // A second add replaces the first; only one entry remains.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = EntryStore::new();

        store.add(key.clone(), value1);
        store.add(key.clone(), value2.clone());

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // A key that was never written is a miss.
    #[test]
    fn prop_miss_for_unwritten_key(
        written in prop::collection::hash_set("[a-m]{1,4}", 0..20),
        probe in "[n-z]{1,4}"
    ) {
        let mut store = EntryStore::new();
        for key in written {
            store.add(key, b"v".to_vec());
        }

        prop_assert_eq!(store.get(&probe), None);
    }

    // The store behaves like a plain map when no sweep runs, and the
    // hit/miss counters match the observed lookups.
    #[test]
    fn prop_matches_model_map(ops in prop::collection::vec(store_op_strategy(), 1..64)) {
        let mut store = EntryStore::new();
        let mut model: HashMap<String, Vec<u8>> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Add { key, value } => {
                    store.add(key.clone(), value.clone());
                    model.insert(key, value);
                }
                StoreOp::Get { key } => {
                    let got = store.get(&key);
                    if got.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, model.len());
    }

    // A sweep removes exactly the entries strictly older than the TTL.
    #[test]
    fn prop_sweep_partitions_by_age(
        ages_ms in prop::collection::hash_map("[a-z]{1,6}", 0u64..400, 0..40),
        ttl_ms in 1u64..300
    ) {
        let now = Instant::now() + Duration::from_secs(1);
        let ttl = Duration::from_millis(ttl_ms);
        let mut store = EntryStore::new();

        for (key, age) in &ages_ms {
            let created_at = now - Duration::from_millis(*age);
            store.insert_entry(key.clone(), CacheEntry::new_at(b"v".to_vec(), created_at));
        }

        let expected_removed = ages_ms.values().filter(|age| **age > ttl_ms).count();
        let removed = store.sweep_at(ttl, now);

        prop_assert_eq!(removed, expected_removed);
        for (key, age) in &ages_ms {
            prop_assert_eq!(store.contains_key(key), *age <= ttl_ms, "key {} age {}", key, age);
        }
    }

    // With a coupled TTL, ticking every `period` removes an entry no later
    // than two periods after it was written, whatever the tick phase.
    #[test]
    fn prop_bounded_staleness(period_ms in 1u64..500, offset_ms in 0u64..500) {
        let period = Duration::from_millis(period_ms);
        let base = Instant::now();
        // Entry is written somewhere within the first period after a tick
        let written_at = base + Duration::from_millis(offset_ms % period_ms);
        let mut store = EntryStore::new();
        store.insert_entry("k".to_string(), CacheEntry::new_at(b"v".to_vec(), written_at));

        let mut tick = base + period;
        while tick <= written_at + period * 2 {
            store.sweep_at(period, tick);
            tick += period;
        }

        prop_assert!(!store.contains_key("k"));
    }
}
