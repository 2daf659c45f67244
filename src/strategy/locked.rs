//! Mutex-Guarded Cache
//!
//! One [`CacheStore`] shared by every thread. Each call holds the lock for
//! exactly one operation, so calls from different threads are totally
//! ordered and never interleave.

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;

// == Locked Cache ==
/// Thread-safe LRU cache behind a single mutex.
///
/// Share it between threads with `Arc`. Calls block until the lock is free;
/// there is no timeout.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use local_lru::LockedCache;
///
/// let cache = Arc::new(LockedCache::new(100));
/// let writer = Arc::clone(&cache);
/// thread::spawn(move || writer.put("MSFT".to_string(), 411.2))
///     .join()
///     .unwrap();
///
/// assert_eq!(cache.get("MSFT"), Some(411.2));
/// ```
#[derive(Debug)]
pub struct LockedCache<K, V> {
    inner: Mutex<CacheStore<K, V>>,
}

impl<K, V> LockedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructors ==
    /// Creates a cache whose entries never expire.
    pub fn new(capacity: usize) -> Self {
        Self::with_ttl(capacity, 0)
    }

    /// Creates a cache whose entries expire `ttl_seconds` after their last
    /// write (0 = never).
    pub fn with_ttl(capacity: usize, ttl_seconds: u64) -> Self {
        debug!(capacity, ttl_seconds, "created locked cache");
        Self {
            inner: Mutex::new(CacheStore::new(capacity, ttl_seconds)),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_ttl(config.capacity, config.ttl_seconds)
    }

    // == Put ==
    /// Stores a key-value pair, evicting the least recently used entry if full.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key)
    }

    /// Removes an entry, reporting whether it was present.
    pub fn erase<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().erase(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    // == Introspection ==
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.inner.lock().ttl_seconds()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_locked_put_and_get() {
        let cache = LockedCache::new(10);

        cache.put("AAPL".to_string(), 189.5);

        assert_eq!(cache.get("AAPL"), Some(189.5));
        assert_eq!(cache.get("TSLA"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.ttl_seconds(), 0);
    }

    #[test]
    fn test_locked_lru_eviction() {
        let cache = LockedCache::new(2);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.get(&1);

        cache.put(3, "three");

        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get(&1), Some("one"));
        assert_eq!(cache.get(&3), Some("three"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_locked_erase_and_clear() {
        let cache = LockedCache::new(4);
        cache.put("a", 1);
        cache.put("b", 2);

        assert!(cache.erase("a"));
        assert!(!cache.erase("a"));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_locked_zero_capacity() {
        let cache = LockedCache::new(0);
        cache.put("a", 1);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_locked_from_config() {
        let cache: LockedCache<String, u8> = LockedCache::from_config(&CacheConfig::new(3, 7));
        assert_eq!(cache.capacity(), 3);
        assert_eq!(cache.ttl_seconds(), 7);
    }

    #[test]
    fn test_locked_concurrent_puts_respect_capacity() {
        let capacity = 64;
        let cache = Arc::new(LockedCache::new(capacity));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500 {
                        cache.put(format!("t{}-{}", t, i), i);
                        let _ = cache.get(&format!("t{}-{}", t, i / 2));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread should not panic");
        }

        let stats = cache.stats();
        assert_eq!(cache.len(), capacity);
        assert_eq!(stats.total_entries, capacity);
        assert_eq!(stats.evictions, 8 * 500 - capacity as u64);
        assert_eq!(stats.hits + stats.misses, 8 * 500);
    }
}
