//! Configuration Module
//!
//! The two tunables every cache carries: capacity and TTL.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default number of entries a cache can hold.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default TTL in seconds (0 = entries never expire).
pub const DEFAULT_TTL_SECONDS: u64 = 0;

/// Cache configuration parameters.
///
/// A capacity of 0 is a valid configuration meaning "cache disabled": writes
/// are dropped and every read misses. A TTL of 0 disables expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Seconds an entry stays valid after its last write, 0 = forever
    pub ttl_seconds: u64,
}

impl CacheConfig {
    /// Creates a config from explicit values.
    pub const fn new(capacity: usize, ttl_seconds: u64) -> Self {
        Self {
            capacity,
            ttl_seconds,
        }
    }

    /// Parses a config from a JSON document.
    ///
    /// Missing fields fall back to their defaults, so `{}` yields
    /// [`CacheConfig::default`].
    ///
    /// # Example
    /// ```
    /// use local_lru::CacheConfig;
    ///
    /// let config = CacheConfig::from_json(r#"{"capacity": 64, "ttl_seconds": 30}"#).unwrap();
    /// assert_eq!(config, CacheConfig::new(64, 30));
    /// ```
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Returns the TTL as a duration, or `None` when expiry is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        match self.ttl_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Returns true when the capacity disables storage entirely.
    pub fn is_disabled(&self) -> bool {
        self.capacity == 0
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL_SECONDS)
    }
}
