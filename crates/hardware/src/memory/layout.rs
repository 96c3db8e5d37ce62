//! Logical address allocation.
//!
//! Regions are placed one after another in a single logical address space,
//! each starting on an alignment boundary. Two regions reserved from the same
//! space never overlap, and with block-size alignment never share a block, so
//! the cache sees the same trace regardless of where the host put the data.

use tracing::trace;

use crate::cache::Cache;

/// Bump allocator of logical addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressSpace {
    next: u64,
    align: u64,
}

impl AddressSpace {
    /// Creates an address space whose first region starts at `base` rounded up to `align`.
    ///
    /// # Panics
    ///
    /// Panics if `align` is zero or the rounded base does not fit in a `u64`.
    pub fn new(base: u64, align: u64) -> Self {
        assert!(align > 0, "region alignment must be at least one byte");
        Self {
            next: align_up(base, align),
            align,
        }
    }

    /// Creates an address space starting at zero whose regions are aligned to
    /// the block size of `cache`.
    pub const fn for_cache(cache: &Cache) -> Self {
        Self {
            next: 0,
            align: cache.block_size(),
        }
    }

    /// Reserves `bytes` bytes and returns the base address of the region.
    ///
    /// The next region starts at the first aligned address past this one.
    ///
    /// # Panics
    ///
    /// Panics if the region would extend past the end of the 64-bit address space.
    pub fn reserve(&mut self, bytes: u64) -> u64 {
        let base = self.next;
        let end = base
            .checked_add(bytes)
            .unwrap_or_else(|| panic!("region of {bytes} bytes at {base:#x} overflows the address space"));
        self.next = align_up(end, self.align);
        trace!(base, bytes, next = self.next, "reserved region");
        base
    }

    /// Address the next reservation will start at.
    pub const fn next_base(&self) -> u64 {
        self.next
    }

    /// Region alignment in bytes.
    pub const fn alignment(&self) -> u64 {
        self.align
    }
}

fn align_up(addr: u64, align: u64) -> u64 {
    addr.div_ceil(align)
        .checked_mul(align)
        .unwrap_or_else(|| panic!("aligning {addr:#x} to {align} overflows the address space"))
}
