//! Scalar array adapter.
//!
//! A `ScalarMemoryAdapter<T>` owns a `Vec<T>` and a logical base address. Each
//! element access first charges the cache for the bytes of that element and
//! then performs the real read or write. Elements that straddle a block
//! boundary touch both blocks.

use std::fmt;
use std::mem;

use super::{AddressSpace, SharedCache};

mod sealed {
    pub trait Sealed {}
}

/// Fixed-size, plain-old-data element types that can be instrumented.
pub trait Scalar: sealed::Sealed + Copy + fmt::Debug + 'static {}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl Scalar for $t {}
        )*
    };
}

impl_scalar!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
);

/// Array of scalars whose element accesses are charged to a shared cache.
///
/// Element `i` lives at logical address `base + i * size_of::<T>()`.
#[derive(Debug)]
pub struct ScalarMemoryAdapter<T: Scalar> {
    cache: SharedCache,
    base: u64,
    data: Vec<T>,
}

impl<T: Scalar> ScalarMemoryAdapter<T> {
    /// Size in bytes of one element.
    pub const ELEMENT_SIZE: u64 = mem::size_of::<T>() as u64;

    /// Creates an adapter over `data` placed at logical address `base`.
    ///
    /// The caller is responsible for keeping regions that share `cache` apart;
    /// [`ScalarMemoryAdapter::allocate`] does that automatically.
    pub const fn new(cache: SharedCache, base: u64, data: Vec<T>) -> Self {
        Self { cache, base, data }
    }

    /// Creates an adapter over `data` at the next free region of `space`.
    pub fn allocate(cache: SharedCache, space: &mut AddressSpace, data: Vec<T>) -> Self {
        let base = space.reserve(data.len() as u64 * Self::ELEMENT_SIZE);
        Self::new(cache, base, data)
    }

    /// Logical address of element `index`.
    pub const fn effective_address(&self, index: usize) -> u64 {
        self.base + index as u64 * Self::ELEMENT_SIZE
    }

    /// Reads element `index`, charging a load for each block it spans.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds (before touching the cache), or if the
    /// cache is already mutably borrowed elsewhere.
    pub fn get(&self, index: usize) -> T {
        self.check_index(index);
        self.cache
            .borrow_mut()
            .load_multi(self.effective_address(index), Self::ELEMENT_SIZE);
        self.data[index]
    }

    /// Writes element `index`, charging a store for each block it spans.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds (before touching the cache), or if the
    /// cache is already mutably borrowed elsewhere.
    pub fn set(&mut self, index: usize, value: T) {
        self.check_index(index);
        self.cache
            .borrow_mut()
            .store_multi(self.effective_address(index), Self::ELEMENT_SIZE);
        self.data[index] = value;
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.data.len(),
            "index {index} out of bounds for region of {} elements",
            self.data.len()
        );
    }

    /// Number of elements.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the region holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical base address of element 0.
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Unmodeled read access to the elements. Does not touch the cache.
    pub const fn data(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Unmodeled write access to the elements. Does not touch the cache.
    pub fn data_mut(&mut self) -> &mut Vec<T> {
        &mut self.data
    }

    /// Handle to the cache this region feeds.
    pub fn cache(&self) -> SharedCache {
        SharedCache::clone(&self.cache)
    }

    /// Releases the elements.
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}
