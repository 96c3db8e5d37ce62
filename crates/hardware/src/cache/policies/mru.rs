//! Most Recently Used (MRU) Replacement Policy.
//!
//! This policy evicts the way that was accessed most recently, which is also
//! the way most recently installed. While counter-intuitive for general
//! workloads, MRU suits cyclic or streaming patterns over a dataset larger than
//! the cache: the block just used is the one least likely to be needed again
//! soon, so the rest of the set survives the sweep.

use super::{RecencyStacks, ReplacementPolicy};

/// MRU Policy state.
#[derive(Debug, Clone)]
pub struct MruPolicy {
    /// Recency lists, one per set. Front is MRU (victim), back is LRU.
    usage: RecencyStacks,
}

impl MruPolicy {
    /// Creates a new MRU policy instance.
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

impl ReplacementPolicy for MruPolicy {
    /// Moves the accessed `way` to the front of the recency list.
    fn update(&mut self, set: usize, way: usize) {
        self.usage.promote(set, way);
    }

    /// Pops the way at the front of the recency list (the most recently used).
    fn eject_one(&mut self, set: usize) -> usize {
        self.usage.pop_most_recent(set)
    }
}
