//! Instrumented memory regions.
//!
//! This module lets ordinary array code drive the cache model. It provides:
//! 1. **Address Space:** A deterministic allocator of logical addresses, so regions
//!    sharing one cache are laid out explicitly instead of by the host allocator.
//! 2. **Scalar Adapter:** A fixed-size array of scalars whose element reads and writes
//!    become cache loads and stores at `base + index * size_of::<T>()`.
//! 3. **Shared Cache Handle:** Several regions may feed the same cache.

/// Scalar array adapter that charges element accesses to a cache.
pub mod adapter;

/// Logical address allocation for regions sharing one cache.
pub mod layout;

use std::cell::RefCell;
use std::rc::Rc;

pub use adapter::{Scalar, ScalarMemoryAdapter};
pub use layout::AddressSpace;

use crate::cache::Cache;

/// Cache handle shared by every region that feeds it.
///
/// The model is single-threaded; callers that need the cache across threads
/// wrap it in their own `Mutex` instead.
pub type SharedCache = Rc<RefCell<Cache>>;

/// Wraps a cache in a [`SharedCache`] handle.
pub fn shared(cache: Cache) -> SharedCache {
    Rc::new(RefCell::new(cache))
}
