//! Multi-Byte Access Tests.
//!
//! A multi-byte access touches each block overlapped by `[addr, addr + size)`
//! exactly once: first at `addr`, then at the start of every following block.
//!
//! Geometry: 4 KiB, 16-byte blocks, 2 ways (128 sets), so no test here
//! evicts anything.

use cachesim_core::{AccessKind, Cache};
use proptest::prelude::*;
use rstest::rstest;

fn test_cache() -> Cache {
    Cache::new(4096, 16, 2)
}

#[rstest]
#[case::inside_one_block(4, 8, 1)]
#[case::exactly_one_block(16, 16, 1)]
#[case::aligned_two_blocks(0, 32, 2)]
#[case::unaligned_three_blocks(10, 30, 3)]
#[case::last_byte_of_block(15, 2, 2)]
#[case::empty(40, 0, 0)]
fn accesses_once_per_block(#[case] addr: u64, #[case] size: u64, #[case] expected: u64) {
    let mut cache = test_cache();
    assert_eq!(cache.access_multi(addr, size, AccessKind::Load), expected);
    assert_eq!(cache.sum_misses(), expected);
    assert_eq!(cache.compulsory_misses(), expected);
}

#[test]
fn unaligned_range_starts_at_address_then_block_bases() {
    let mut cache = test_cache();
    cache.load_multi(10, 30);
    for block in 0..3 {
        assert_eq!(cache.block_stat(block * 16).map(|s| s.misses), Some(1));
    }
    assert_eq!(cache.block_stat(48), None);
}

#[test]
fn empty_range_records_nothing() {
    let mut cache = test_cache();
    cache.store_multi(100, 0);
    assert_eq!(cache.stats_csv(), "0,0,0,0");
    assert!(!cache.contains(100));
}

#[test]
fn store_multi_dirties_every_touched_block() {
    let mut cache = test_cache();
    cache.store_multi(8, 24);
    let decoder = *cache.decoder();
    for addr in [8, 16] {
        let set = decoder.set_index(addr);
        let tag = decoder.tag(addr);
        let way = cache
            .set_ways(set)
            .iter()
            .find(|w| w.is_valid() && w.tag() == tag)
            .copied();
        assert!(way.is_some_and(|w| w.is_dirty()), "block at {addr} not dirty");
    }
    assert!(!cache.contains(32));
}

#[test]
fn repeat_is_all_hits() {
    let mut cache = test_cache();
    cache.load_multi(3, 40);
    cache.load_multi(3, 40);
    assert_eq!(cache.stats_csv(), "3,3,3,0");
}

#[test]
fn range_reaching_end_of_address_space_terminates() {
    let mut cache = test_cache();
    let count = cache.access_multi(u64::MAX - 3, 100, AccessKind::Load);
    assert_eq!(count, 1);
    assert!(cache.contains(u64::MAX));
}

proptest! {
    #[test]
    fn access_count_matches_blocks_spanned(addr in 0u64..1 << 20, size in 1u64..512) {
        let mut cache = test_cache();
        let spanned = (addr + size - 1) / 16 - addr / 16 + 1;
        prop_assert_eq!(cache.access_multi(addr, size, AccessKind::Load), spanned);
        prop_assert_eq!(cache.stats().tracked_blocks() as u64, spanned);
    }
}
