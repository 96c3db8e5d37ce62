//! Memory access kinds.
//!
//! A cache access is either a load or a store. The distinction only matters for the
//! dirty bit: a store marks the resident block dirty, so its eventual eviction is
//! charged a write-back (flush).

/// Kind of memory access presented to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Data read. Leaves a resident block's dirty bit untouched.
    Load,

    /// Data write. Marks the resident block dirty.
    Store,
}

impl AccessKind {
    /// Returns `true` for [`AccessKind::Store`].
    #[inline(always)]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }
}

impl From<bool> for AccessKind {
    /// Maps an `is_store` flag onto an access kind.
    fn from(is_store: bool) -> Self {
        if is_store { Self::Store } else { Self::Load }
    }
}
