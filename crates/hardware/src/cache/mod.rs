//! Set-Associative Cache Model.
//!
//! This module implements a single-level set-associative cache that counts
//! outcomes instead of modeling time. Every access ends in exactly one of
//! three ways:
//! 1. **Hit:** a valid way in the set holds the tag.
//! 2. **Fill:** the block misses and is installed into the first invalid way.
//! 3. **Evict:** the block misses, the set is full, and the replacement policy
//!    picks a victim. A dirty victim is charged a flush at its own address
//!    before it is overwritten.
//!
//! Outcomes are recorded per block in a [`StatisticsTable`].

/// Cache replacement policy implementations (LRU, MRU).
pub mod policies;

use tracing::{debug, trace};

use self::policies::ReplacementPolicy;
use crate::common::{AccessKind, AddressDecoder, ConfigError, DecodedAddr};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::{BlockStat, CacheParameters, CacheReport, StatisticsTable};

/// One way of a set: tag, valid, and dirty bits.
///
/// Ways start invalid and are never invalidated; a valid way is only
/// overwritten by another install.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Way {
    tag: u64,
    valid: bool,
    dirty: bool,
}

impl Way {
    const fn resident(tag: u64, dirty: bool) -> Self {
        Self {
            tag,
            valid: true,
            dirty,
        }
    }

    /// Tag of the resident block. Meaningless while the way is invalid.
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Returns `true` if the way holds a block.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` if the resident block was stored to since it was installed.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// Result of a single-block access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident in `way`.
    Hit {
        /// Way that held the block.
        way: usize,
    },
    /// The block missed and was installed into the previously invalid `way`.
    Fill {
        /// Way the block was installed into.
        way: usize,
    },
    /// The block missed and replaced the block previously held by `way`.
    Evict {
        /// Way the block was installed into.
        way: usize,
        /// Block-aligned address of the replaced block.
        victim: u64,
        /// Whether the replaced block was dirty and charged a flush.
        flushed: bool,
    },
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Way the accessed block occupies after the access.
    pub const fn way(&self) -> usize {
        match *self {
            Self::Hit { way } | Self::Fill { way } | Self::Evict { way, .. } => way,
        }
    }
}

/// Set-associative cache with a pluggable replacement policy.
///
/// Ways are stored flat: set `s` occupies `lines[s * ways .. (s + 1) * ways]`.
/// The cache is mutated only through accesses and is never resized.
#[derive(Debug)]
pub struct Cache {
    lines: Vec<Way>,
    decoder: AddressDecoder,
    ways: usize,
    kind: Option<PolicyType>,
    policy: Box<dyn ReplacementPolicy>,
    stats: StatisticsTable,
}

impl Cache {
    /// Creates an LRU cache.
    ///
    /// # Arguments
    ///
    /// * `size` - Capacity in bytes. Truncated to a whole number of sets.
    /// * `block_size` - Block size in bytes.
    /// * `assoc` - Number of ways per set.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` or `assoc` is zero, or if `size` cannot hold one
    /// full set.
    pub fn new(size: u64, block_size: u64, assoc: usize) -> Self {
        Self::lru(size, block_size, assoc)
    }

    /// Creates an LRU cache. Same preconditions as [`Cache::new`].
    pub fn lru(size: u64, block_size: u64, assoc: usize) -> Self {
        Self::from_config(&CacheConfig::new(size, block_size).with_ways(assoc))
    }

    /// Creates an MRU cache. Same preconditions as [`Cache::new`].
    pub fn mru(size: u64, block_size: u64, assoc: usize) -> Self {
        Self::from_config(
            &CacheConfig::new(size, block_size)
                .with_ways(assoc)
                .with_policy(PolicyType::Mru),
        )
    }

    /// Creates a cache from a configuration, using the configured policy.
    ///
    /// # Panics
    ///
    /// Panics if the configuration fails [`CacheConfig::validate`].
    pub fn from_config(config: &CacheConfig) -> Self {
        match Self::try_from_config(config) {
            Ok(cache) => cache,
            Err(e) => panic!("invalid cache geometry: {e}"),
        }
    }

    /// Creates a cache from a configuration, reporting invalid geometry as an error.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheConfig::validate`].
    pub fn try_from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let sets = config.sets() as usize;
        let policy = policies::build(config.policy, sets, config.ways);
        Ok(Self::assemble(config, Some(config.policy), policy))
    }

    /// Creates a cache with the geometry of `config` and a caller-supplied policy.
    ///
    /// `config.policy` is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the configuration fails [`CacheConfig::validate`].
    pub fn with_policy(config: &CacheConfig, policy: Box<dyn ReplacementPolicy>) -> Self {
        if let Err(e) = config.validate() {
            panic!("invalid cache geometry: {e}");
        }
        Self::assemble(config, None, policy)
    }

    fn assemble(
        config: &CacheConfig,
        kind: Option<PolicyType>,
        policy: Box<dyn ReplacementPolicy>,
    ) -> Self {
        let sets = config.sets();
        debug!(
            sets,
            ways = config.ways,
            block_size = config.block_bytes,
            dropped_bytes = config.size_bytes - sets * config.ways as u64 * config.block_bytes,
            policy = kind.map_or("custom", PolicyType::name),
            "cache constructed"
        );
        Self {
            lines: vec![Way::default(); sets as usize * config.ways],
            decoder: AddressDecoder::new(config.block_bytes, sets),
            ways: config.ways,
            kind,
            policy,
            stats: StatisticsTable::new(),
        }
    }

    /// Loads the block containing `addr`.
    pub fn load(&mut self, addr: u64) {
        let _ = self.access(addr, AccessKind::Load);
    }

    /// Stores to the block containing `addr`, marking it dirty.
    pub fn store(&mut self, addr: u64) {
        let _ = self.access(addr, AccessKind::Store);
    }

    /// Loads every block overlapped by `[addr, addr + size)`.
    pub fn load_multi(&mut self, addr: u64, size: u64) {
        let _ = self.access_multi(addr, size, AccessKind::Load);
    }

    /// Stores to every block overlapped by `[addr, addr + size)`.
    pub fn store_multi(&mut self, addr: u64, size: u64) {
        let _ = self.access_multi(addr, size, AccessKind::Store);
    }

    /// Accesses every block overlapped by `[addr, addr + size)` once, in address order.
    ///
    /// The first access is at `addr`, each following one at the start of the next
    /// block. A trailing partial block is charged as a full access.
    ///
    /// # Returns
    ///
    /// The number of single-block accesses performed.
    pub fn access_multi(&mut self, mut addr: u64, mut size: u64, kind: AccessKind) -> u64 {
        let mut accesses = 0;
        while size > 0 {
            let _ = self.access(addr, kind);
            accesses += 1;
            let step = self.decoder.block_remainder(addr);
            size = size.saturating_sub(step);
            let Some(next) = addr.checked_add(step) else {
                break;
            };
            addr = next;
        }
        accesses
    }

    /// Performs one single-block access.
    ///
    /// 1. Hit search over ways `0..assoc`: on a match the dirty bit absorbs
    ///    `kind`, the hit is recorded, the policy is notified, and nothing else changes.
    /// 2. Otherwise a miss is recorded (cold if the block was never referenced).
    /// 3. Fill: the first invalid way receives the block.
    /// 4. Evict: the policy ejects a victim. A dirty victim's flush is recorded
    ///    against its reconstructed address before the way is overwritten.
    ///
    /// # Panics
    ///
    /// Panics if the replacement policy returns a way outside `0..assoc`.
    pub fn access(&mut self, addr: u64, kind: AccessKind) -> AccessOutcome {
        let DecodedAddr {
            tag, set, block, ..
        } = self.decoder.decode(addr);
        let is_store = kind.is_store();
        let base = set * self.ways;
        let ways = &self.lines[base..base + self.ways];

        if let Some(way) = ways.iter().position(|w| w.valid && w.tag == tag) {
            self.lines[base + way].dirty |= is_store;
            self.stats.record_hit(block);
            self.policy.update(set, way);
            return AccessOutcome::Hit { way };
        }

        self.stats.record_miss(block);

        if let Some(way) = ways.iter().position(|w| !w.valid) {
            self.lines[base + way] = Way::resident(tag, is_store);
            self.policy.update(set, way);
            return AccessOutcome::Fill { way };
        }

        let way = self.policy.eject_one(set);
        assert!(
            way < self.ways,
            "replacement policy ejected way {way} from a {}-way set",
            self.ways
        );
        let old = self.lines[base + way];
        let victim = self.decoder.addr_from_set_and_tag(set, old.tag);
        if old.dirty {
            self.stats
                .record_flush(self.decoder.block_from_set_and_tag(set, old.tag));
        }
        trace!(set, way, victim, flushed = old.dirty, "evicted block");

        self.lines[base + way] = Way::resident(tag, is_store);
        self.policy.update(set, way);
        AccessOutcome::Evict {
            way,
            victim,
            flushed: old.dirty,
        }
    }

    /// Returns `true` if the block containing `addr` is resident.
    ///
    /// Does not record statistics or touch the replacement policy.
    pub fn contains(&self, addr: u64) -> bool {
        let DecodedAddr { tag, set, .. } = self.decoder.decode(addr);
        self.set_ways(set).iter().any(|w| w.valid && w.tag == tag)
    }

    /// Read-only view of the ways of `set`.
    ///
    /// # Panics
    ///
    /// Panics if `set >= self.sets()`.
    pub fn set_ways(&self, set: usize) -> &[Way] {
        let base = set * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// Effective capacity in bytes: `sets * assoc * block_size`.
    pub const fn size(&self) -> u64 {
        self.sets() * self.ways as u64 * self.block_size()
    }

    /// Number of sets.
    pub const fn sets(&self) -> u64 {
        self.decoder.sets()
    }

    /// Associativity (ways per set).
    pub const fn assoc(&self) -> usize {
        self.ways
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> u64 {
        self.decoder.block_size()
    }

    /// Built-in policy in use, or `None` for a policy supplied through [`Cache::with_policy`].
    pub const fn policy_kind(&self) -> Option<PolicyType> {
        self.kind
    }

    /// Address decoder for this cache's geometry.
    pub const fn decoder(&self) -> &AddressDecoder {
        &self.decoder
    }

    /// Statistics recorded so far.
    pub const fn stats(&self) -> &StatisticsTable {
        &self.stats
    }

    /// Counters of the block containing `addr`, or `None` if it was never referenced.
    pub fn block_stat(&self, addr: u64) -> Option<BlockStat> {
        self.stats.block(self.decoder.block_id(addr))
    }

    /// Total hits.
    pub fn sum_hits(&self) -> u64 {
        self.stats.sum_hits()
    }

    /// Total misses.
    pub fn sum_misses(&self) -> u64 {
        self.stats.sum_misses()
    }

    /// Total dirty write-backs.
    pub fn sum_flushes(&self) -> u64 {
        self.stats.sum_flushes()
    }

    /// Misses on first-ever block references.
    pub const fn compulsory_misses(&self) -> u64 {
        self.stats.compulsory_misses()
    }

    /// Header line matching [`Cache::parameters_csv`].
    pub const fn parameters_csv_header(&self) -> &'static str {
        crate::stats::PARAMETERS_CSV_HEADER
    }

    /// Value line: `size,assoc,sets,block_size`.
    pub fn parameters_csv(&self) -> String {
        self.parameters().to_csv()
    }

    /// Header line matching [`Cache::stats_csv`].
    pub const fn stats_csv_header(&self) -> &'static str {
        self.stats.stats_csv_header()
    }

    /// Value line: `hits,misses,cold_misses,flushes`.
    pub fn stats_csv(&self) -> String {
        self.stats.stats_csv()
    }

    /// Geometry as reported in [`Cache::parameters_csv`].
    pub const fn parameters(&self) -> CacheParameters {
        CacheParameters {
            size: self.size(),
            assoc: self.ways,
            sets: self.sets(),
            block_size: self.block_size(),
            policy: self.kind,
        }
    }

    /// Parameters and aggregate counters as a serializable record.
    pub fn report(&self) -> CacheReport {
        CacheReport {
            parameters: self.parameters(),
            stats: self.stats.summary(),
        }
    }
}
