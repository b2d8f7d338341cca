//! Cache Statistics Module
//!
//! Counts the recency transitions a store goes through: lookups, fresh
//! inserts, overwrites and LRU evictions.

use serde::Serialize;

use crate::cache::Key;

// == Cache Stats ==
/// Snapshot of what a store has done since construction.
///
/// Counters are cumulative and survive `clear`; only `total_entries`
/// reflects the moment the snapshot was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `get` calls that found their key (each one promoted it)
    pub hits: u64,
    /// `get` calls that found nothing
    pub misses: u64,
    /// `put` calls that introduced a new key
    pub inserts: u64,
    /// `put` calls that replaced the value of a present key
    pub overwrites: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Key removed by the most recent eviction
    pub last_evicted: Option<Key>,
    pub total_entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub(crate) fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub(crate) fn record_write(&mut self, replaced: bool) {
        if replaced {
            self.overwrites += 1;
        } else {
            self.inserts += 1;
        }
    }

    pub(crate) fn record_eviction(&mut self, key: Key) {
        self.evictions += 1;
        self.last_evicted = Some(key);
    }

    /// Copies the counters alongside the current entry count.
    pub(crate) fn snapshot(&self, total_entries: usize) -> Self {
        Self {
            total_entries,
            ..self.clone()
        }
    }

    /// Number of times a present key was moved to the most recently used
    /// end, by a `get` hit or by an overwriting `put`.
    pub fn promotions(&self) -> u64 {
        self.hits + self.overwrites
    }

    /// Share of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use crate::cache::RecencyStore;

    #[test]
    fn test_stats_fresh_store() {
        let store = RecencyStore::<u8>::new(4).unwrap();
        let stats = store.stats();

        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.last_evicted, None);
        assert_eq!(stats.promotions(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_stats_split_inserts_and_overwrites() {
        let mut store = RecencyStore::new(4).unwrap();

        store.put(1, 'a');
        store.put(2, 'b');
        store.put(1, 'c');
        store.put(1, 'd');

        let stats = store.stats();
        assert_eq!(stats.inserts, 2);
        assert_eq!(stats.overwrites, 2);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_stats_promotions_count_hits_and_overwrites() {
        let mut store = RecencyStore::new(3).unwrap();

        store.put(1, 'a');
        store.put(2, 'b');
        store.get(1); // promotes 1
        store.get(9); // miss, no promotion
        store.put(2, 'c'); // promotes 2

        let stats = store.stats();
        assert_eq!(stats.promotions(), 2);
        assert_eq!(stats.hit_rate(), 0.5);
        assert_eq!(store.recent_keys(), vec![1, 2]);
    }

    #[test]
    fn test_stats_last_evicted_follows_recency() {
        let mut store = RecencyStore::new(2).unwrap();

        store.put(1, 'a');
        store.put(2, 'b');
        store.get(1);
        store.put(3, 'c'); // 2 is least recently used
        assert_eq!(store.stats().last_evicted, Some(2));

        store.put(4, 'd'); // then 1
        let stats = store.stats();
        assert_eq!(stats.last_evicted, Some(1));
        assert_eq!(stats.evictions, 2);
    }

    #[test]
    fn test_stats_overwrite_when_full_does_not_evict() {
        let mut store = RecencyStore::new(2).unwrap();

        store.put(1, 'a');
        store.put(2, 'b');
        store.put(1, 'c');

        let stats = store.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.last_evicted, None);
        assert_eq!(stats.overwrites, 1);
    }

    #[test]
    fn test_stats_remove_is_not_an_eviction() {
        let mut store = RecencyStore::new(2).unwrap();

        store.put(1, 'a');
        store.remove(1);

        let stats = store.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_stats_survive_clear() {
        let mut store = RecencyStore::new(1).unwrap();

        store.put(1, 'a');
        store.put(2, 'b');
        store.get(2);
        store.clear();

        let stats = store.stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.inserts, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.last_evicted, Some(1));
    }
}
