//! Property Tests for Cache Invariants.
//!
//! Random geometries (including non-power-of-two block sizes and set counts,
//! and capacities with a truncated remainder) driven by random load/store
//! traces, under both built-in policies.

use std::collections::HashSet;

use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use cachesim_core::{AccessKind, AccessOutcome, Cache};
use proptest::prelude::*;

use crate::common::assert_no_duplicate_tags;

prop_compose! {
    fn geometry()(sets in 1u64..=8, ways in 1usize..=4, block in 1u64..=48)
        (sets in Just(sets), ways in Just(ways), block in Just(block),
         extra in 0..block * ways as u64) -> CacheConfig {
        CacheConfig::new(sets * ways as u64 * block + extra, block).with_ways(ways)
    }
}

fn policy() -> impl Strategy<Value = ReplacementPolicy> {
    prop_oneof![Just(ReplacementPolicy::Lru), Just(ReplacementPolicy::Mru)]
}

fn trace() -> impl Strategy<Value = Vec<(u64, bool)>> {
    prop::collection::vec((0u64..4096, any::<bool>()), 0..200)
}

proptest! {
    #[test]
    fn geometry_truncates_to_whole_sets(config in geometry()) {
        let cache = Cache::from_config(&config);
        prop_assert!(cache.size() <= config.size_bytes);
        prop_assert!(config.size_bytes - cache.size() < config.block_bytes * config.ways as u64);
        prop_assert_eq!(cache.size(), cache.sets() * cache.assoc() as u64 * cache.block_size());
    }

    #[test]
    fn counters_stay_consistent(config in geometry(), policy in policy(), trace in trace()) {
        let mut cache = Cache::from_config(&config.with_policy(policy));
        let mut blocks = HashSet::new();
        let mut stores = 0;

        for &(addr, store) in &trace {
            let _ = cache.access(addr, AccessKind::from(store));
            assert_no_duplicate_tags(&cache);
            let _ = blocks.insert(addr / config.block_bytes);
            stores += u64::from(store);
        }

        prop_assert_eq!(cache.sum_hits() + cache.sum_misses(), trace.len() as u64);
        prop_assert_eq!(cache.compulsory_misses(), blocks.len() as u64);
        prop_assert_eq!(cache.stats().tracked_blocks(), blocks.len());
        prop_assert!(cache.sum_flushes() <= stores);
        prop_assert!(cache.compulsory_misses() <= cache.sum_misses());
    }

    #[test]
    fn immediate_repeat_always_hits(
        config in geometry(),
        policy in policy(),
        trace in trace(),
        addr in 0u64..4096,
    ) {
        let mut cache = Cache::from_config(&config.with_policy(policy));
        for &(a, store) in &trace {
            let _ = cache.access(a, AccessKind::from(store));
        }
        let first = cache.access(addr, AccessKind::Load);
        let second = cache.access(addr, AccessKind::Load);
        prop_assert_eq!(second, AccessOutcome::Hit { way: first.way() });
    }

    #[test]
    fn lru_flushes_store_after_assoc_conflicts(config in geometry(), addr in 0u64..4096) {
        let mut cache = Cache::from_config(&config);
        let decoder = *cache.decoder();
        let set = decoder.set_index(addr);
        let tag = decoder.tag(addr);

        cache.store(addr);
        let mut last = None;
        for n in 1..=cache.assoc() as u64 {
            last = Some(cache.access(decoder.addr_from_set_and_tag(set, tag + n), AccessKind::Load));
        }

        prop_assert_eq!(
            last,
            Some(AccessOutcome::Evict {
                way: 0,
                victim: decoder.block_base(addr),
                flushed: true,
            })
        );
        prop_assert_eq!(cache.sum_flushes(), 1);
        prop_assert_eq!(cache.block_stat(addr).map(|s| s.flushes), Some(1));
        prop_assert!(!cache.contains(addr));
    }

    #[test]
    fn mru_flushes_store_installed_last(config in geometry(), addr in 0u64..4096) {
        let mut cache = Cache::from_config(&config.with_policy(ReplacementPolicy::Mru));
        let decoder = *cache.decoder();
        let set = decoder.set_index(addr);
        let tag = decoder.tag(addr);
        let ways = cache.assoc() as u64;

        for n in 1..ways {
            cache.load(decoder.addr_from_set_and_tag(set, tag + n));
        }
        cache.store(addr);
        let outcome = cache.access(decoder.addr_from_set_and_tag(set, tag + ways), AccessKind::Load);

        prop_assert_eq!(
            outcome,
            AccessOutcome::Evict {
                way: cache.assoc() - 1,
                victim: decoder.block_base(addr),
                flushed: true,
            }
        );
        prop_assert_eq!(cache.sum_flushes(), 1);
        prop_assert_eq!(cache.block_stat(addr).map(|s| s.flushes), Some(1));
    }

    #[test]
    fn direct_mapped_store_flushes_on_first_conflict(
        sets in 1u64..=8,
        block in 1u64..=48,
        policy in policy(),
        addr in 0u64..4096,
    ) {
        let config = CacheConfig::new(sets * block, block).with_ways(1).with_policy(policy);
        let mut cache = Cache::from_config(&config);
        let decoder = *cache.decoder();

        cache.store(addr);
        let conflict = decoder.addr_from_set_and_tag(decoder.set_index(addr), decoder.tag(addr) + 1);
        prop_assert_eq!(
            cache.access(conflict, AccessKind::Load),
            AccessOutcome::Evict {
                way: 0,
                victim: decoder.block_base(addr),
                flushed: true,
            }
        );
        prop_assert_eq!(cache.sum_flushes(), 1);
        prop_assert_eq!(cache.stats().summary().misses, 2);
    }
}
