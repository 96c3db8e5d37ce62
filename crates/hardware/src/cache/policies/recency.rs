//! Per-set recency lists.
//!
//! Each set owns an ordered list of way ids, most recently used at the front.
//! A way id enters its list on first install and is moved to the front on every
//! touch, so it never appears twice. Eviction pops from one end.

use std::collections::VecDeque;

/// One recency list per set, most recently used first.
#[derive(Debug, Clone)]
pub struct RecencyStacks {
    usage: Vec<VecDeque<usize>>,
}

impl RecencyStacks {
    /// Creates empty recency lists.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity, used to size each list.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            usage: (0..sets).map(|_| VecDeque::with_capacity(ways)).collect(),
        }
    }

    /// Moves `way` to the front of `set`'s list, inserting it if absent.
    ///
    /// O(W) in the associativity.
    pub fn promote(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            let _ = stack.remove(pos);
        }
        stack.push_front(way);
    }

    /// Removes and returns the most recently used way of `set`.
    ///
    /// # Panics
    ///
    /// Panics if `set` has no tracked ways. The cache only evicts from full sets,
    /// so an empty list means a way was installed without being recorded.
    pub fn pop_most_recent(&mut self, set: usize) -> usize {
        self.usage[set]
            .pop_front()
            .unwrap_or_else(|| panic!("eviction requested from set {set} with no tracked ways"))
    }

    /// Removes and returns the least recently used way of `set`.
    ///
    /// # Panics
    ///
    /// Panics if `set` has no tracked ways.
    pub fn pop_least_recent(&mut self, set: usize) -> usize {
        self.usage[set]
            .pop_back()
            .unwrap_or_else(|| panic!("eviction requested from set {set} with no tracked ways"))
    }

    /// Ways of `set` in recency order, most recent first.
    pub fn order(&self, set: usize) -> impl Iterator<Item = usize> + '_ {
        self.usage[set].iter().copied()
    }

    /// Number of ways currently tracked for `set`.
    pub fn len(&self, set: usize) -> usize {
        self.usage[set].len()
    }

    /// Returns `true` if `set` tracks no ways.
    pub fn is_empty(&self, set: usize) -> bool {
        self.usage[set].is_empty()
    }
}
