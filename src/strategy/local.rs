//! Thread-Local Cache
//!
//! Every thread owns a private [`CacheStore`] per value type, created lazily
//! on first use. No locks are taken on the data path and threads never see
//! each other's entries.
//!
//! The process-wide defaults set by [`LocalCache::configure`] only apply to
//! stores materialized afterwards. A thread that has already touched the
//! cache keeps the capacity and TTL it started with.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;

type LocalStore<V> = RefCell<CacheStore<String, V>>;

thread_local! {
    /// Stores materialized by the current thread, keyed by value type.
    static STORES: RefCell<HashMap<TypeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Defaults handed to stores at materialization, keyed by value type.
fn defaults_table() -> &'static RwLock<HashMap<TypeId, CacheConfig>> {
    static DEFAULTS: OnceLock<RwLock<HashMap<TypeId, CacheConfig>>> = OnceLock::new();
    DEFAULTS.get_or_init(|| RwLock::new(HashMap::new()))
}

// == Local Cache Handle ==
/// Stateless handle to the thread-local cache for values of type `V`.
///
/// All handles for the same `V` address the same per-thread store, so the
/// handle can be copied freely or recreated with [`LocalCache::handle`].
///
/// # Example
/// ```
/// use local_lru::LocalCache;
///
/// let cache = LocalCache::<String>::configure(2, 60);
/// cache.add_item("key1", "value1".to_string());
/// assert_eq!(cache.get_item("key1").as_deref(), Some("value1"));
/// ```
pub struct LocalCache<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> Clone for LocalCache<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for LocalCache<V> {}

impl<V> fmt::Debug for LocalCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalCache")
            .field("value_type", &type_name::<V>())
            .finish()
    }
}

impl<V: Clone + 'static> Default for LocalCache<V> {
    fn default() -> Self {
        Self::handle()
    }
}

impl<V: Clone + 'static> LocalCache<V> {
    // == Configure ==
    /// Sets the defaults used by threads that have not touched the cache yet
    /// and returns a handle.
    ///
    /// No store is created and already materialized stores are unaffected.
    pub fn configure(capacity: usize, ttl_seconds: u64) -> Self {
        Self::configure_with(CacheConfig::new(capacity, ttl_seconds))
    }

    /// Same as [`configure`](Self::configure), taking a [`CacheConfig`].
    pub fn configure_with(config: CacheConfig) -> Self {
        defaults_table().write().insert(TypeId::of::<V>(), config);
        info!(
            value_type = type_name::<V>(),
            capacity = config.capacity,
            ttl_seconds = config.ttl_seconds,
            "updated local cache defaults"
        );
        Self::handle()
    }

    /// Returns a handle without changing the defaults.
    pub fn handle() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Returns the defaults a newly materialized store would capture.
    ///
    /// Falls back to [`CacheConfig::default`] if `configure` was never called
    /// for `V`.
    pub fn defaults() -> CacheConfig {
        defaults_table()
            .read()
            .get(&TypeId::of::<V>())
            .copied()
            .unwrap_or_default()
    }

    // == Item Operations ==
    /// Stores a value in the calling thread's cache.
    pub fn add_item(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        Self::with_store(|store| store.put(key, value));
    }

    /// Retrieves a value from the calling thread's cache.
    pub fn get_item(&self, key: &str) -> Option<V> {
        Self::with_store(|store| store.get(key))
    }

    /// Removes a value, reporting whether it was present.
    pub fn remove_item(&self, key: &str) -> bool {
        Self::with_store(|store| store.erase(key))
    }

    /// Returns true if `key` is stored in this thread's cache but has expired.
    pub fn contains_expired(&self, key: &str) -> bool {
        Self::with_store(|store| store.contains_expired(key, std::time::Instant::now()))
    }

    /// Removes every expired entry from this thread's cache.
    pub fn purge_expired(&self) -> usize {
        Self::with_store(|store| store.purge_expired())
    }

    pub fn clear(&self) {
        Self::with_store(|store| store.clear());
    }

    // == Introspection ==
    pub fn len(&self) -> usize {
        Self::with_store(|store| store.len())
    }

    pub fn is_empty(&self) -> bool {
        Self::with_store(|store| store.is_empty())
    }

    /// Capacity of this thread's store, fixed when it was materialized.
    pub fn capacity(&self) -> usize {
        Self::with_store(|store| store.capacity())
    }

    /// TTL of this thread's store, fixed when it was materialized.
    pub fn ttl_seconds(&self) -> u64 {
        Self::with_store(|store| store.ttl_seconds())
    }

    pub fn stats(&self) -> CacheStats {
        Self::with_store(|store| store.stats())
    }

    /// Returns true if the calling thread already owns a store for `V`.
    ///
    /// Unlike every other operation this never materializes one.
    pub fn is_materialized(&self) -> bool {
        STORES.with(|stores| stores.borrow().contains_key(&TypeId::of::<V>()))
    }

    fn with_store<R>(f: impl FnOnce(&mut CacheStore<String, V>) -> R) -> R {
        let slot = STORES.with(|stores| {
            Rc::clone(
                stores
                    .borrow_mut()
                    .entry(TypeId::of::<V>())
                    .or_insert_with(Self::materialize),
            )
        });
        let store = slot
            .downcast::<LocalStore<V>>()
            .expect("local store registered under a foreign TypeId");
        let mut store = store.borrow_mut();
        f(&mut store)
    }

    fn materialize() -> Rc<dyn Any> {
        let config = Self::defaults();
        debug!(
            value_type = type_name::<V>(),
            thread = ?std::thread::current().id(),
            capacity = config.capacity,
            ttl_seconds = config.ttl_seconds,
            "materialized thread-local cache store"
        );
        Rc::new(RefCell::new(CacheStore::<String, V>::from_config(&config)))
    }
}
