//! Cache statistics collection and reporting.
//!
//! This module tracks per-block outcomes for the cache model. It provides:
//! 1. **Per-block counters:** Hits, misses, and flushes keyed by block id, created lazily.
//! 2. **Cold misses:** A global count of first-ever references to a block.
//! 3. **Aggregates:** Sums across all tracked blocks.
//! 4. **Reports:** CSV header/value line pairs and a serializable summary.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::ReplacementPolicy;

/// Counters for a single block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BlockStat {
    /// Accesses that found the block resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,
    /// Dirty write-backs of the block on eviction.
    pub flushes: u64,
}

/// Column names of [`CacheParameters::to_csv`], in order.
pub const PARAMETERS_CSV_HEADER: &str = "size,assoc,sets,block_size";

/// Column names of [`StatisticsTable::stats_csv`], in order.
pub const STATS_CSV_HEADER: &str = "hits,misses,cold_misses,flushes";

/// Column names of [`StatisticsTable::blocks_csv`], in order.
pub const BLOCKS_CSV_HEADER: &str = "block,hits,misses,flushes";

/// Per-block statistics table plus the global cold-miss counter.
///
/// A block without an entry has never been referenced; that absence is what
/// classifies a miss as cold. Entries are never removed.
#[derive(Clone, Debug, Default)]
pub struct StatisticsTable {
    blocks: HashMap<u64, BlockStat>,
    cold_misses: u64,
}

impl StatisticsTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, block: u64) -> &mut BlockStat {
        self.blocks.entry(block).or_default()
    }

    /// Records a hit on `block`.
    pub fn record_hit(&mut self, block: u64) {
        self.entry(block).hits += 1;
    }

    /// Records a miss on `block`, counting a cold miss if the block was never seen.
    pub fn record_miss(&mut self, block: u64) {
        if !self.blocks.contains_key(&block) {
            self.cold_misses += 1;
        }
        self.entry(block).misses += 1;
    }

    /// Records a dirty write-back of `block`.
    pub fn record_flush(&mut self, block: u64) {
        self.entry(block).flushes += 1;
    }

    /// Counters for `block`, or `None` if it was never referenced.
    pub fn block(&self, block: u64) -> Option<BlockStat> {
        self.blocks.get(&block).copied()
    }

    /// Number of distinct blocks referenced so far.
    pub fn tracked_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// All tracked blocks with their counters, sorted by block id.
    pub fn per_block(&self) -> Vec<(u64, BlockStat)> {
        let mut rows: Vec<_> = self.blocks.iter().map(|(&b, &s)| (b, s)).collect();
        rows.sort_unstable_by_key(|&(b, _)| b);
        rows
    }

    /// Total hits across all blocks.
    pub fn sum_hits(&self) -> u64 {
        self.blocks.values().map(|s| s.hits).sum()
    }

    /// Total misses across all blocks.
    pub fn sum_misses(&self) -> u64 {
        self.blocks.values().map(|s| s.misses).sum()
    }

    /// Total flushes across all blocks.
    pub fn sum_flushes(&self) -> u64 {
        self.blocks.values().map(|s| s.flushes).sum()
    }

    /// Number of compulsory (cold) misses.
    pub const fn compulsory_misses(&self) -> u64 {
        self.cold_misses
    }

    /// Header line matching [`StatisticsTable::stats_csv`].
    pub const fn stats_csv_header(&self) -> &'static str {
        STATS_CSV_HEADER
    }

    /// Value line: `hits,misses,cold_misses,flushes`.
    pub fn stats_csv(&self) -> String {
        format!(
            "{},{},{},{}",
            self.sum_hits(),
            self.sum_misses(),
            self.compulsory_misses(),
            self.sum_flushes()
        )
    }

    /// Header line matching [`StatisticsTable::blocks_csv`].
    pub const fn blocks_csv_header(&self) -> &'static str {
        BLOCKS_CSV_HEADER
    }

    /// One `block,hits,misses,flushes` line per tracked block, sorted by block id.
    pub fn blocks_csv(&self) -> Vec<String> {
        self.per_block()
            .into_iter()
            .map(|(b, s)| format!("{b},{},{},{}", s.hits, s.misses, s.flushes))
            .collect()
    }

    /// Aggregate counters as a serializable record.
    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            hits: self.sum_hits(),
            misses: self.sum_misses(),
            cold_misses: self.compulsory_misses(),
            flushes: self.sum_flushes(),
        }
    }
}

/// Aggregate counters at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    /// Total hits.
    pub hits: u64,
    /// Total misses.
    pub misses: u64,
    /// Misses on first-ever references.
    pub cold_misses: u64,
    /// Dirty write-backs.
    pub flushes: u64,
}

impl StatsSummary {
    /// Total accesses (hits plus misses).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Geometry of a cache as it is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheParameters {
    /// Effective capacity in bytes (`sets * assoc * block_size`).
    pub size: u64,
    /// Ways per set.
    pub assoc: usize,
    /// Number of sets.
    pub sets: u64,
    /// Block size in bytes.
    pub block_size: u64,
    /// Built-in replacement policy, `None` when a custom policy was supplied.
    pub policy: Option<ReplacementPolicy>,
}

impl CacheParameters {
    /// Value line: `size,assoc,sets,block_size`.
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{}",
            self.size, self.assoc, self.sets, self.block_size
        )
    }
}

/// Parameters and aggregate counters of one cache, for machine-readable output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheReport {
    /// Cache geometry.
    pub parameters: CacheParameters,
    /// Aggregate counters.
    pub stats: StatsSummary,
}

impl CacheReport {
    /// Serializes the report as a single JSON object.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` serializer error.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
