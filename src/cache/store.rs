//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use tracing::{debug, trace};

use crate::cache::lru::NodeId;
use crate::cache::{CacheStats, Key, LruTracker, MAX_PREALLOCATED_ENTRIES};
use crate::error::{CacheError, Result};

#[derive(Debug)]
struct Slot<V> {
    value: V,
    node: NodeId,
}

// == Recency Store ==
/// Bounded key-value storage with LRU eviction.
///
/// Not synchronized; every mutation goes through `&mut self`. Wrap it in
/// [`RecencyCache`](crate::cache::RecencyCache) to share it across threads.
#[derive(Debug)]
pub struct RecencyStore<V> {
    /// Key-value storage, each entry remembering its tracker handle
    entries: HashMap<Key, Slot<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: NonZeroUsize,
}

impl<V> RecencyStore<V> {
    // == Constructor ==
    /// Creates a new store holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CacheError::InvalidCapacity(capacity))?;
        Ok(Self::with_capacity(capacity))
    }

    /// Creates a new store from an already validated capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let prealloc = capacity.get().min(MAX_PREALLOCATED_ENTRIES);
        debug!("Creating recency store with capacity {}", capacity);

        Self {
            entries: HashMap::with_capacity(prealloc),
            lru: LruTracker::with_capacity(prealloc),
            stats: CacheStats::new(capacity.get()),
            capacity,
        }
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Records a hit or a miss. A miss leaves the recency order untouched.
    pub fn get(&mut self, key: Key) -> Option<&V> {
        match self.entries.get(&key) {
            Some(slot) => {
                self.lru.touch(slot.node);
                self.stats.record_lookup(true);
                trace!("Cache hit for key {}", key);
                Some(&slot.value)
            }
            None => {
                self.stats.record_lookup(false);
                trace!("Cache miss for key {}", key);
                None
            }
        }
    }

    // == Peek ==
    /// Retrieves a value without promoting it or touching statistics.
    pub fn peek(&self, key: Key) -> Option<&V> {
        self.entries.get(&key).map(|slot| &slot.value)
    }

    // == Put ==
    /// Stores a value under `key`, taking ownership of it.
    ///
    /// An existing key has its value replaced and becomes most recently used.
    /// A new key arriving while the store is full first evicts the least
    /// recently used entry, whose key is returned.
    pub fn put(&mut self, key: Key, value: V) -> Option<Key> {
        if let Some(slot) = self.entries.get_mut(&key) {
            slot.value = value;
            self.lru.touch(slot.node);
            self.stats.record_write(true);
            return None;
        }

        let mut evicted = None;
        if self.entries.len() >= self.capacity.get() {
            if let Some(oldest) = self.lru.evict_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction(oldest);
                debug!("Evicted key {} (least recently used)", oldest);
                evicted = Some(oldest);
            }
        }

        let node = self.lru.insert(key);
        self.entries.insert(key, Slot { value, node });
        self.stats.record_write(false);

        evicted
    }

    // == Remove ==
    /// Removes an entry by key, handing its value back.
    pub fn remove(&mut self, key: Key) -> Option<V> {
        let slot = self.entries.remove(&key)?;
        self.lru.remove(slot.node);
        debug!("Removed key {}", key);
        Some(slot.value)
    }

    // == Clear ==
    /// Drops every entry. Capacity and counters are kept.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        debug!("Cleared {} entries", dropped);
    }

    // == Contains ==
    /// Checks for a key without promoting it.
    pub fn contains(&self, key: Key) -> bool {
        self.entries.contains_key(&key)
    }

    // == Recent Keys ==
    /// Returns a copy of the recency order, least recently used first.
    pub fn recent_keys(&self) -> Vec<Key> {
        self.lru.keys()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    // == Consistency Check ==
    /// Verifies that the entry table and the recency order hold the same
    /// keys exactly once and that the size bound holds.
    ///
    /// # Errors
    /// Returns [`CacheError::Inconsistent`] describing the first violation.
    pub fn check_consistency(&self) -> Result<()> {
        let order = self.lru.keys();

        if self.entries.len() > self.capacity.get() {
            return Err(CacheError::Inconsistent(format!(
                "{} entries exceed capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        if order.len() != self.lru.len() {
            return Err(CacheError::Inconsistent(format!(
                "order walk visited {} keys but tracker holds {}",
                order.len(),
                self.lru.len()
            )));
        }
        if order.len() != self.entries.len() {
            return Err(CacheError::Inconsistent(format!(
                "order holds {} keys but table holds {}",
                order.len(),
                self.entries.len()
            )));
        }

        let mut seen = HashSet::with_capacity(order.len());
        for key in order {
            if !seen.insert(key) {
                return Err(CacheError::Inconsistent(format!(
                    "key {} appears twice in order",
                    key
                )));
            }
            match self.entries.get(&key) {
                Some(slot) if self.lru.key(slot.node) == Some(key) => {}
                Some(_) => {
                    return Err(CacheError::Inconsistent(format!(
                        "key {} points at a foreign order node",
                        key
                    )));
                }
                None => {
                    return Err(CacheError::Inconsistent(format!(
                        "key {} is ordered but not stored",
                        key
                    )));
                }
            }
        }

        Ok(())
    }
}
