//! Concurrency Strategies
//!
//! Two ways of exposing [`crate::cache::CacheStore`] to concurrent code. Pick
//! one per key space; they share nothing.
//!
//! # Strategies
//! - [`LocalCache`]: one private store per thread, no locking, per-type
//!   defaults snapshotted when a thread first touches the cache
//! - [`LockedCache`]: one store shared by all threads behind a mutex

mod local;
mod locked;

pub use local::LocalCache;
pub use locked::LockedCache;
