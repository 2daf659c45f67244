//! Cache Module
//!
//! Single-owner LRU map with lazy TTL expiration. Concurrency is layered on
//! top by [`crate::strategy`].

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{Iter, LruTracker, SlotId};
pub use stats::CacheStats;
pub use store::CacheStore;
