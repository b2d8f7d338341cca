//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction.

mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use lru::{LruTracker, NodeId};
pub use shared::RecencyCache;
pub use stats::CacheStats;
pub use store::RecencyStore;

/// Cache key type; records are looked up by integer id.
pub type Key = i64;

// == Public Constants ==
/// Upper bound on slots reserved up front, however large the capacity
pub const MAX_PREALLOCATED_ENTRIES: usize = 1024;
