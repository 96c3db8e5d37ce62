//! Common types shared by the cache model.
//!
//! This module provides the building blocks used by every other component. It includes:
//! 1. **Address Decoding:** Mapping byte addresses to tag, set, and block offset.
//! 2. **Access Kinds:** Distinguishing loads from stores.
//! 3. **Error Handling:** Configuration errors raised before a cache is constructed.

/// Address decomposition (tag, set index, block offset) and its inverse.
pub mod addr;

/// Memory access kind definitions.
pub mod data;

/// Configuration error type.
pub mod error;

pub use addr::{AddressDecoder, DecodedAddr};
pub use data::AccessKind;
pub use error::ConfigError;
