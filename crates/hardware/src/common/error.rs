//! Configuration errors.
//!
//! The access path has no recoverable errors: its preconditions are caller
//! obligations and are asserted. Errors only arise when a cache geometry is
//! built from external input (JSON text or a file) and can be rejected before a
//! cache exists.

use thiserror::Error;

/// Reasons a [`CacheConfig`](crate::config::CacheConfig) cannot describe a cache.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Block size of zero bytes.
    #[error("block size must be at least one byte")]
    ZeroBlockSize,

    /// Associativity of zero ways.
    #[error("associativity must be at least one way")]
    ZeroWays,

    /// Capacity too small to hold a single set of `ways` blocks.
    #[error(
        "capacity of {size_bytes} bytes holds no complete set of {ways} x {block_bytes}-byte blocks"
    )]
    NoSets {
        /// Requested capacity in bytes.
        size_bytes: u64,
        /// Requested block size in bytes.
        block_bytes: u64,
        /// Requested associativity.
        ways: usize,
    },

    /// Malformed JSON configuration.
    #[error("invalid cache configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read cache configuration: {0}")]
    Io(#[from] std::io::Error),
}
