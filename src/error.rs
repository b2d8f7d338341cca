//! Error types for the recency cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the recency cache.
///
/// Runtime operations never fail; the only error a caller sees in normal use
/// is a rejected capacity at construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be at least one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Entry table and recency order disagree
    #[error("Cache inconsistent: {0}")]
    Inconsistent(String),
}

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
