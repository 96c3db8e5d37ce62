//! Cache Replacement Policies.
//!
//! Implements the algorithms that select victim ways in set-associative caches.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Mru`: Most Recently Used.
//!
//! Both keep one recency list per set ([`RecencyStacks`]) and only differ in
//! which end of the list they evict from.

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

/// Per-set recency lists shared by the LRU and MRU policies.
pub mod recency;

use std::fmt;

pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use recency::RecencyStacks;

use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// The cache calls [`update`](ReplacementPolicy::update) after every hit and
/// every install, and [`eject_one`](ReplacementPolicy::eject_one) only when a
/// set has no invalid way left.
pub trait ReplacementPolicy: fmt::Debug + Send {
    /// Records that `way` in `set` was just accessed or installed.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&mut self, set: usize, way: usize);

    /// Removes a victim from the policy's bookkeeping for `set` and returns it.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index. Every way of the set is valid.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn eject_one(&mut self, set: usize) -> usize;
}

/// Builds the boxed policy selected by a configuration.
///
/// # Arguments
///
/// * `kind` - Which policy to build.
/// * `sets` - The number of sets in the cache.
/// * `ways` - The associativity of the cache.
pub fn build(kind: PolicyType, sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Lru => Box::new(LruPolicy::new(sets, ways)),
        PolicyType::Mru => Box::new(MruPolicy::new(sets, ways)),
    }
}
