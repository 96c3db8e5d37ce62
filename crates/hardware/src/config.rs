//! Configuration for the cache model.
//!
//! This module defines the immutable parameters a cache is built from. It provides:
//! 1. **Defaults:** Baseline geometry constants used when a field is omitted.
//! 2. **Structures:** `CacheConfig`, the capacity / block size / associativity / policy tuple.
//! 3. **Enums:** The replacement policy selector.
//! 4. **Presets:** Geometries of the `HammerBlade` manycore L2 used in graph studies.
//!
//! Configuration is built in code (`CacheConfig::new`) or deserialized from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default capacity in bytes (4 KiB).
    pub const CACHE_SIZE: u64 = 4096;

    /// Default block size in bytes (64 bytes).
    pub const BLOCK_SIZE: u64 = 64;

    /// Default associativity (2-way).
    pub const CACHE_WAYS: usize = 2;

    /// Number of vault caches on a `HammerBlade` pod (top and bottom rows of a 16-wide mesh).
    pub const HAMMERBLADE_CACHES: u64 = 16 * 2;

    /// Sets per `HammerBlade` vault cache.
    pub const HAMMERBLADE_SETS: u64 = 64;
}

/// Cache replacement policy algorithms.
///
/// Specifies which way is evicted when a block must be installed in a full set.
/// Both policies share the same recency tracking and differ only in which end
/// of the recency order is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the way that has gone untouched for the longest time.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Most Recently Used replacement policy.
    ///
    /// Evicts the way touched most recently. Effective for cyclic access
    /// patterns larger than the cache.
    #[serde(alias = "Mru")]
    Mru,
}

impl ReplacementPolicy {
    /// Short lowercase name used in logs and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Mru => "mru",
        }
    }
}

/// Parameters of a single set-associative cache.
///
/// The number of sets is derived as `size_bytes / (block_bytes * ways)` with
/// truncating division: a capacity that is not a whole number of sets silently
/// loses the remainder.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let config = CacheConfig::new(1000, 64);
/// assert_eq!(config.ways, 2);
/// assert_eq!(config.sets(), 7); // 1000 / 128, remainder dropped
///
/// let json = r#"{ "size_bytes": 32768, "block_bytes": 64, "ways": 4, "policy": "MRU" }"#;
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.policy, ReplacementPolicy::Mru);
/// assert_eq!(config.sets(), 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u64,
    /// Block (line) size in bytes.
    #[serde(default = "CacheConfig::default_block")]
    pub block_bytes: u64,
    /// Associativity (ways per set).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,
    /// Replacement policy.
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    const fn default_size() -> u64 {
        defaults::CACHE_SIZE
    }

    const fn default_block() -> u64 {
        defaults::BLOCK_SIZE
    }

    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Creates an LRU configuration with the default associativity of two ways.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total capacity in bytes.
    /// * `block_bytes` - Block size in bytes.
    pub const fn new(size_bytes: u64, block_bytes: u64) -> Self {
        Self {
            size_bytes,
            block_bytes,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::Lru,
        }
    }

    /// Returns this configuration with a different associativity.
    #[must_use]
    pub const fn with_ways(mut self, ways: usize) -> Self {
        self.ways = ways;
        self
    }

    /// Returns this configuration with a different replacement policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of sets this geometry yields, truncating any partial set.
    ///
    /// Returns zero for degenerate geometries (zero block size or ways) instead
    /// of dividing by zero; [`CacheConfig::validate`] rejects those.
    pub const fn sets(&self) -> u64 {
        match self
            .size_bytes
            .checked_div(self.block_bytes.saturating_mul(self.ways as u64))
        {
            Some(sets) => sets,
            None => 0,
        }
    }

    /// Checks that this configuration describes at least one set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBlockSize`], [`ConfigError::ZeroWays`], or
    /// [`ConfigError::NoSets`] when the geometry is unusable.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.block_bytes == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if self.sets() == 0 {
            return Err(ConfigError::NoSets {
                size_bytes: self.size_bytes,
                block_bytes: self.block_bytes,
                ways: self.ways,
            });
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON text.
    ///
    /// Omitted fields take their defaults (4096 bytes, 64-byte blocks, 2 ways, LRU).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or a geometry error
    /// from [`CacheConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`CacheConfig::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Aggregate vault-cache geometry of a `HammerBlade` pod: 32 caches of
    /// 64 sets, 8 ways, and 32-byte (eight-word) blocks, under LRU.
    pub const fn hammerblade() -> Self {
        Self::hammerblade_with(8, 8 * 4)
    }

    /// `HammerBlade` variant with 4 ways and 64-byte (sixteen-word) blocks.
    pub const fn hammerblade16() -> Self {
        Self::hammerblade_with(4, 16 * 4)
    }

    const fn hammerblade_with(ways: usize, block_bytes: u64) -> Self {
        let sets = defaults::HAMMERBLADE_CACHES * defaults::HAMMERBLADE_SETS;
        Self {
            size_bytes: sets * ways as u64 * block_bytes,
            block_bytes,
            ways,
            policy: ReplacementPolicy::Lru,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(defaults::CACHE_SIZE, defaults::BLOCK_SIZE)
    }
}
