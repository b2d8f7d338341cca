//! Configuration Module
//!
//! Construction-time settings for a recency cache.

use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::error::{CacheError, Result};

/// Number of detail records kept by default.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be non-zero"),
};

/// Cache configuration parameters.
///
/// The crate reads no environment variables or files; hosts that keep
/// settings on disk can deserialize this struct as part of their own config.
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
}

impl CacheConfig {
    /// Creates a config with the given capacity. Validation is deferred to
    /// [`validate`](Self::validate).
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Checks that the capacity can hold at least one entry.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn validate(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.capacity).ok_or(CacheError::InvalidCapacity(self.capacity))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY.get(),
        }
    }
}
