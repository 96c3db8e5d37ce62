//! # Unit Components
//!
//! Tests organized by crate module: address decoding and errors, configuration,
//! the cache and its policies, statistics reports, and instrumented memory.





/// Unit tests for statistics aggregation and CSV/JSON reports.
pub mod stats;
