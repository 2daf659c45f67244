//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::lru::SlotId;

// == Cache Entry ==
/// A single stored value with its expiry deadline and recency handle.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiry deadline, None = no expiration
    pub expires_at: Option<Instant>,
    /// Position of this entry's key in the recency list
    pub(crate) slot: SlotId,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry written at `now`.
    pub(crate) fn new(value: V, ttl: Option<Duration>, now: Instant, slot: SlotId) -> Self {
        Self {
            value,
            expires_at: deadline_from(now, ttl),
            slot,
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL from `now`.
    pub(crate) fn refresh(&mut self, value: V, ttl: Option<Duration>, now: Instant) {
        self.value = value;
        self.expires_at = deadline_from(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is still valid at its exact deadline and expired strictly
    /// after it.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now > deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the time left before expiry, or None if no expiration is set.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Computes the deadline for a write at `now`. A deadline past the range of
/// `Instant` is treated as never expiring.
fn deadline_from(now: Instant, ttl: Option<Duration>) -> Option<Instant> {
    ttl.and_then(|ttl| now.checked_add(ttl))
}
