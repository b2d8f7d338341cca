//! Record models cached by id
//!
//! Defines the detail record the fetch layer decodes and hands to the cache.

pub mod detail;

// Re-export commonly used types
pub use detail::{cache_detail, cache_detail_as, new_detail_cache, DetailCache, DigimonDetail};
