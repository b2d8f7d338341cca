//! Shared Cache Module
//!
//! Thread-safe handle over a [`RecencyStore`].

use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::{CacheStats, Key, RecencyStore};
use crate::config::CacheConfig;
use crate::error::Result;

// == Recency Cache ==
/// Bounded LRU cache shared between threads.
///
/// Table, recency order and statistics sit behind one read/write lock.
/// Observers (`len`, `recent_keys`, `peek`, `contains`, `stats`) take the
/// shared side; `get`, `put`, `remove` and `clear` hold the exclusive side
/// for the whole operation, so a lookup and its promotion are never split.
///
/// Cloning the handle shares the same cache. Values handed out are clones,
/// so callers may mutate them freely.
///
/// # Example
/// ```
/// use recency_cache::RecencyCache;
///
/// let cache = RecencyCache::new(3).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
/// cache.put(3, "three");
///
/// cache.get(1);
/// cache.put(4, "four");
///
/// assert_eq!(cache.get(2), None);
/// assert_eq!(cache.recent_keys(), vec![3, 1, 4]);
/// ```
#[derive(Debug)]
pub struct RecencyCache<V> {
    inner: Arc<RwLock<RecencyStore<V>>>,
}

impl<V> Clone for RecencyCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> RecencyCache<V> {
    // == Constructors ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`](crate::CacheError::InvalidCapacity)
    /// when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        RecencyStore::new(capacity).map(Self::from_store)
    }

    /// Creates an empty cache from an already validated capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self::from_store(RecencyStore::with_capacity(capacity))
    }

    /// Creates an empty cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate().map(Self::with_capacity)
    }

    /// Wraps an existing store.
    pub fn from_store(store: RecencyStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // == Put ==
    /// Stores `value` under `key`, evicting the least recently used entry if
    /// a new key arrives while the cache is full.
    pub fn put(&self, key: Key, value: V) {
        self.inner.write().put(key, value);
    }

    // == Remove ==
    /// Removes one entry, handing its value back.
    pub fn remove(&self, key: Key) -> Option<V> {
        self.inner.write().remove(key)
    }

    // == Clear ==
    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    // == Observers ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Checks for a key without promoting it.
    pub fn contains(&self, key: Key) -> bool {
        self.inner.read().contains(key)
    }

    /// Snapshot of the recency order, least recently used first.
    pub fn recent_keys(&self) -> Vec<Key> {
        self.inner.read().recent_keys()
    }

    /// Snapshot of hit, miss and eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.read().stats()
    }

    /// Verifies the table and the recency order agree.
    pub fn check_consistency(&self) -> Result<()> {
        self.inner.read().check_consistency()
    }
}

impl<V: Clone> RecencyCache<V> {
    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently
    /// used. `None` is an ordinary miss.
    pub fn get(&self, key: Key) -> Option<V> {
        self.inner.write().get(key).cloned()
    }

    // == Peek ==
    /// Returns a copy of the value without promoting it.
    pub fn peek(&self, key: Key) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    // == Get Or Insert ==
    /// Returns the cached value, or builds it with `f`, stores it and
    /// returns a copy. Lookup and insertion happen under one exclusive lock.
    ///
    /// `f` runs while the lock is held and must not call back into this
    /// cache.
    pub fn get_or_insert_with<F>(&self, key: Key, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        let mut store = self.inner.write();
        if let Some(value) = store.get(key) {
            return value.clone();
        }

        let value = f();
        store.put(key, value.clone());
        value
    }
}
