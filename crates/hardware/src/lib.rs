//! Set-associative cache model.
//!
//! This crate models a single-level set-associative cache in order to study the
//! hit, miss, and write-back behavior of memory-access traces (for example those
//! produced by graph traversals) without timing or real hardware:
//! 1. **Cache:** Address decoding, the hit / fill / evict access protocol, and dirty write-back accounting.
//! 2. **Policies:** Pluggable victim selection (LRU, MRU) behind the `ReplacementPolicy` trait.
//! 3. **Statistics:** Per-block hit/miss/flush counters, cold misses, and CSV/JSON reports.
//! 4. **Memory:** Scalar arrays whose element accesses are charged to a shared cache.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::Cache;
//!
//! // One 64-byte block, direct-mapped.
//! let mut cache = Cache::new(64, 64, 1);
//! cache.store(0);
//! cache.load(8); // same block: hit
//! cache.load(64); // conflicts, evicts the dirty block at 0
//!
//! assert_eq!(cache.stats_csv_header(), "hits,misses,cold_misses,flushes");
//! assert_eq!(cache.stats_csv(), "1,2,2,1");
//! ```

/// Common types (address decoding, access kinds, errors).
pub mod common;
/// Cache configuration (geometry, policy selector, presets).
pub mod config;
/// The cache model and its replacement policies.
pub mod cache;
/// Instrumented scalar arrays and logical address allocation.
pub mod memory;
/// Per-block statistics and reports.
pub mod stats;

/// The cache model; construct with `Cache::new`, `Cache::mru`, or `Cache::from_config`.
pub use crate::cache::{AccessOutcome, Cache};
/// Access kind (load or store).
pub use crate::common::AccessKind;
/// Cache geometry and policy; use `CacheConfig::new` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Array adapter and its address allocator.
pub use crate::memory::{AddressSpace, ScalarMemoryAdapter, SharedCache};
