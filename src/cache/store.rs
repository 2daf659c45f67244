//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.
//!
//! The store does no synchronization of its own. The strategies in
//! [`crate::strategy`] decide how it is shared.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Iter, LruTracker, SlotId};
use crate::config::CacheConfig;

// == Cache Store ==
/// Bounded map with LRU eviction and lazy TTL expiry.
///
/// All operations are O(1) amortized. Expired entries are only discovered
/// when read (or by an explicit [`purge_expired`](Self::purge_expired)); there
/// is no background sweeper.
///
/// # Example
/// ```
/// use local_lru::cache::CacheStore;
///
/// let mut store = CacheStore::new(2, 0);
/// store.put("a", 1);
/// store.put("b", 2);
/// store.get("a");
/// store.put("c", 3); // evicts "b", the least recently used
///
/// assert_eq!(store.get("b"), None);
/// assert_eq!(store.get("a"), Some(1));
/// ```
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Seconds an entry lives after its last write, 0 = forever
    ttl_seconds: u64,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity and TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, 0 disables the store
    /// * `ttl_seconds` - Lifetime of an entry after its last write, 0 = never expires
    pub fn new(capacity: usize, ttl_seconds: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity,
            ttl_seconds,
        }
    }

    /// Creates a store from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, config.ttl_seconds)
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// A hit marks the entry as most recently used. An expired entry is
    /// removed and reported as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get_at(key, Instant::now())
    }

    /// Same as [`get`](Self::get), evaluated at an explicit instant.
    pub fn get_at<Q>(&mut self, key: &Q, now: Instant) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let entry = match self.entries.get(key) {
            Some(entry) => entry,
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if entry.is_expired(now) {
            let slot = entry.slot;
            self.entries.remove(key);
            self.lru.remove(slot);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            trace!(remaining = self.entries.len(), "dropped expired entry on read");
            return None;
        }

        self.lru.move_to_front(entry.slot);
        self.stats.record_hit();
        Some(entry.value.clone())
    }

    // == Peek ==
    /// Reads a value without touching recency order or removing anything.
    ///
    /// Expired entries read as absent.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| &entry.value)
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists its value is replaced, its TTL restarts and
    /// it becomes most recently used; nothing is evicted. Otherwise, if the
    /// store is full, the least recently used entry is evicted first. With a
    /// capacity of 0 the call does nothing.
    pub fn put(&mut self, key: K, value: V) {
        self.put_at(key, value, Instant::now());
    }

    /// Same as [`put`](Self::put), with the write stamped at `now`.
    pub fn put_at(&mut self, key: K, value: V, now: Instant) {
        if self.capacity == 0 {
            return;
        }

        let ttl = self.ttl();

        // Overwrite in place
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, ttl, now);
            self.lru.move_to_front(entry.slot);
            return;
        }

        while self.entries.len() >= self.capacity {
            if !self.evict_oldest() {
                break;
            }
        }

        let slot = self.lru.push_front(key.clone());
        self.entries.insert(key, CacheEntry::new(value, ttl, now, slot));
    }

    // == Erase ==
    /// Removes an entry by key, reporting whether it was present.
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.entries.remove(key) {
            Some(entry) => {
                self.lru.remove(entry.slot);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Contains Expired ==
    /// Returns true if `key` is stored but its TTL had elapsed at `now`.
    ///
    /// Read-only: neither recency order nor contents change.
    pub fn contains_expired<Q>(&self, key: &Q, now: Instant) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.is_expired(now))
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Same as [`purge_expired`](Self::purge_expired), evaluated at `now`.
    pub fn purge_expired_at(&mut self, now: Instant) -> usize {
        if self.ttl_seconds == 0 {
            return 0;
        }

        let expired: Vec<SlotId> = self
            .entries
            .values()
            .filter(|entry| entry.is_expired(now))
            .map(|entry| entry.slot)
            .collect();

        for slot in &expired {
            if let Some(key) = self.lru.remove(*slot) {
                self.entries.remove(&key);
            }
        }

        let count = expired.len();
        if count > 0 {
            self.stats.record_expirations(count);
            debug!(removed = count, "purged expired entries");
        }
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats;
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> Iter<'_, K> {
        self.lru.iter()
    }

    // == Length ==
    /// Returns the current number of entries, expired-but-unread ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Returns the TTL as a duration, or None when expiry is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        self.config().ttl()
    }

    /// Returns the configuration this store was built with.
    pub fn config(&self) -> CacheConfig {
        CacheConfig::new(self.capacity, self.ttl_seconds)
    }

    fn evict_oldest(&mut self) -> bool {
        match self.lru.pop_back() {
            Some(evicted) => {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                trace!(capacity = self.capacity, "evicted least recently used entry");
                true
            }
            None => false,
        }
    }

    /// Panics if the index and the recency list disagree.
    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        assert_eq!(self.entries.len(), self.lru.len(), "index/recency size mismatch");
        assert!(self.entries.len() <= self.capacity, "capacity exceeded");
        for key in self.lru.iter() {
            let entry = self.entries.get(key).expect("recency key missing from index");
            assert!(self.lru.get(entry.slot) == Some(key), "entry slot points elsewhere");
        }
    }
}
