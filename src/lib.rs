//! Recency Cache - A bounded, thread-safe LRU cache
//!
//! Maps integer ids to detail records, evicting the least recently used
//! entry when full. One [`RecencyCache`] handle is cloned into every
//! collaborator that reads or populates it.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{CacheStats, Key, RecencyCache, RecencyStore};
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{CacheError, Result};
pub use models::{DetailCache, DigimonDetail};
