//! Address decomposition for set-associative lookup.
//!
//! This module maps byte addresses onto cache geometry. It provides the following:
//! 1. **Decomposition:** Splitting an address into tag, set index, and block offset.
//! 2. **Block Identity:** Computing the block id (`addr / block_size`) used as the statistics key.
//! 3. **Reconstruction:** Rebuilding a block-aligned address from a `(set, tag)` pair, which is
//!    how a dirty victim is attributed when it is written back.
//!
//! All arithmetic is exact integer arithmetic on `u64`.

/// The fields of a byte address as seen by a particular cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// Tag stored in the way when the block is resident.
    pub tag: u64,
    /// Index of the set the block competes for.
    pub set: usize,
    /// Byte offset of the address inside its block.
    pub offset: u64,
    /// Block id (`addr / block_size`).
    pub block: u64,
}

/// Pure mapping between byte addresses and `(tag, set, offset)` for one cache geometry.
///
/// A decoder is only meaningful with `block_size >= 1` and `sets >= 1`; [`AddressDecoder::new`]
/// enforces both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    block_size: u64,
    sets: u64,
}

impl AddressDecoder {
    /// Creates a decoder for the given block size and set count.
    ///
    /// # Arguments
    ///
    /// * `block_size` - Block size in bytes.
    /// * `sets` - Number of sets in the cache.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` or `sets` is zero. Either would make every
    /// decoding step a division by zero.
    pub const fn new(block_size: u64, sets: u64) -> Self {
        assert!(block_size > 0, "block size must be at least one byte");
        assert!(sets > 0, "cache must contain at least one set");
        Self { block_size, sets }
    }

    /// Block size in bytes.
    #[inline(always)]
    pub const fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Number of sets.
    #[inline(always)]
    pub const fn sets(&self) -> u64 {
        self.sets
    }

    /// Splits `addr` into all of its fields at once.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        DecodedAddr {
            tag: self.tag(addr),
            set: self.set_index(addr),
            offset: self.block_offset(addr),
            block: self.block_id(addr),
        }
    }

    /// Byte offset of `addr` within its block.
    #[inline(always)]
    pub const fn block_offset(&self, addr: u64) -> u64 {
        addr % self.block_size
    }

    /// Number of bytes from `addr` to the end of its block, including `addr` itself.
    #[inline(always)]
    pub const fn block_remainder(&self, addr: u64) -> u64 {
        self.block_size - self.block_offset(addr)
    }

    /// Address of the first byte of the block containing `addr`.
    #[inline(always)]
    pub const fn block_base(&self, addr: u64) -> u64 {
        addr - self.block_offset(addr)
    }

    /// Block id of `addr`: the address with the intra-block offset removed.
    #[inline(always)]
    pub const fn block_id(&self, addr: u64) -> u64 {
        addr / self.block_size
    }

    /// Set index that `addr` maps to.
    #[inline(always)]
    pub const fn set_index(&self, addr: u64) -> usize {
        (self.block_id(addr) % self.sets) as usize
    }

    /// Tag stored for `addr` once it is resident.
    #[inline(always)]
    pub const fn tag(&self, addr: u64) -> u64 {
        self.block_id(addr) / self.sets
    }

    /// Reconstructs the block id from a set index and tag.
    #[inline(always)]
    pub const fn block_from_set_and_tag(&self, set: usize, tag: u64) -> u64 {
        tag * self.sets + set as u64
    }

    /// Reconstructs the block-aligned address from a set index and tag.
    #[inline(always)]
    pub const fn addr_from_set_and_tag(&self, set: usize, tag: u64) -> u64 {
        self.block_from_set_and_tag(set, tag) * self.block_size
    }
}
