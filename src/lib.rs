//! Local LRU - LRU caching with optional TTL expiration
//!
//! Provides a bounded least-recently-used map with lazy time-to-live expiry,
//! exposed either as a per-thread cache that needs no synchronization or as a
//! single cache shared behind a mutex.

pub mod cache;
pub mod config;
pub mod error;
pub mod strategy;

pub use cache::{CacheStats, CacheStore};
pub use config::CacheConfig;
pub use error::CacheError;
pub use strategy::{LocalCache, LockedCache};
