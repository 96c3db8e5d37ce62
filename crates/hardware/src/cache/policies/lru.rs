//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the way that has not been accessed for the longest time.
//! Accessed ways move to the front of their set's recency list; the victim is
//! taken from the back.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `eject_one()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Workloads with strong temporal locality
//! - **Worst Case:** Cyclic scans larger than the set (every access misses)

use super::{RecencyStacks, ReplacementPolicy};

/// LRU Policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Recency lists, one per set. Front is MRU, back is LRU.
    usage: RecencyStacks,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: RecencyStacks::new(sets, ways),
        }
    }

    /// Read access to the recency lists.
    pub const fn recency(&self) -> &RecencyStacks {
        &self.usage
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves the accessed `way` to the front of the recency list.
    fn update(&mut self, set: usize, way: usize) {
        self.usage.promote(set, way);
    }

    /// Pops the way at the back of the recency list (the least recently used).
    fn eject_one(&mut self, set: usize) -> usize {
        self.usage.pop_least_recent(set)
    }
}
