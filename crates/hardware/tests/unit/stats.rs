//! # Statistics and Report Tests
//!
//! Exact CSV header and value lines, per-block breakdowns, and the JSON report.
//!
//! The shared trace runs on a 256-byte, 2-way cache with 64-byte blocks
//! (2 sets). Blocks 0, 2 and 4 all map to set 0:
//!   store 0   -> cold miss, fill way 0 (dirty)
//!   load 8    -> hit on block 0
//!   load 128  -> cold miss, fill way 1
//!   load 256  -> cold miss, evicts block 0 (LRU) and flushes it

use cachesim_core::Cache;
use cachesim_core::stats::{BlockStat, StatisticsTable, StatsSummary};
use pretty_assertions::assert_eq;
use serde_json::json;

fn traced_cache() -> Cache {
    let mut cache = Cache::new(256, 64, 2);
    cache.store(0);
    cache.load(8);
    cache.load(128);
    cache.load(256);
    cache
}

#[test]
fn test_csv_headers() {
    let cache = Cache::new(256, 64, 2);
    assert_eq!(cache.parameters_csv_header(), "size,assoc,sets,block_size");
    assert_eq!(cache.stats_csv_header(), "hits,misses,cold_misses,flushes");
    assert_eq!(cache.stats().blocks_csv_header(), "block,hits,misses,flushes");
}

#[test]
fn test_parameters_report_effective_size() {
    assert_eq!(Cache::new(1000, 64, 2).parameters_csv(), "896,2,7,64");
    assert_eq!(Cache::new(4096, 64, 4).parameters_csv(), "4096,4,16,64");
}

#[test]
fn test_fresh_cache_stats_are_zero() {
    let cache = Cache::new(256, 64, 2);
    assert_eq!(cache.stats_csv(), "0,0,0,0");
    assert!(cache.stats().per_block().is_empty());
}

#[test]
fn test_stats_csv_after_trace() {
    assert_eq!(traced_cache().stats_csv(), "1,3,3,1");
}

#[test]
fn test_blocks_csv_sorted_by_block() {
    let cache = traced_cache();
    assert_eq!(
        cache.stats().blocks_csv(),
        vec!["0,1,1,1", "2,0,1,0", "4,0,1,0"]
    );
    assert_eq!(
        cache.block_stat(63),
        Some(BlockStat {
            hits: 1,
            misses: 1,
            flushes: 1
        })
    );
    assert_eq!(cache.block_stat(64), None);
}

#[test]
fn test_summary_and_hit_rate() {
    let summary = traced_cache().stats().summary();
    assert_eq!(
        summary,
        StatsSummary {
            hits: 1,
            misses: 3,
            cold_misses: 3,
            flushes: 1
        }
    );
    assert_eq!(summary.accesses(), 4);
    assert!((summary.hit_rate() - 0.25).abs() < f64::EPSILON);
    assert!(StatsSummary::default().hit_rate().abs() < f64::EPSILON);
}

#[test]
fn test_report_json() {
    let report = traced_cache().report();
    let text = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!({
            "parameters": {
                "size": 256,
                "assoc": 2,
                "sets": 2,
                "block_size": 64,
                "policy": "LRU"
            },
            "stats": {
                "hits": 1,
                "misses": 3,
                "cold_misses": 3,
                "flushes": 1
            }
        })
    );
}

#[test]
fn test_table_sums_match_per_block() {
    let mut table = StatisticsTable::new();
    table.record_miss(1);
    table.record_hit(1);
    table.record_hit(1);
    table.record_miss(2);
    table.record_flush(1);
    table.record_miss(1);

    assert_eq!(table.sum_hits(), 2);
    assert_eq!(table.sum_misses(), 3);
    assert_eq!(table.sum_flushes(), 1);
    assert_eq!(table.compulsory_misses(), 2);
    assert_eq!(table.tracked_blocks(), 2);
    assert_eq!(table.stats_csv(), "2,3,2,1");
}
