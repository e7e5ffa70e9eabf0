//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use crate::cache::clock::duration_ms;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: T,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds), always `created_at + ttl`
    pub expires_at: u64,
    /// Insertion sequence number, breaks ties between equal expiries
    pub seq: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` after `now_ms`.
    pub fn new(key: String, value: T, ttl: Duration, now_ms: u64, seq: u64) -> Self {
        Self {
            key,
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(duration_ms(ttl)),
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is still live at exactly `expires_at` and is logically absent
    /// once the current time is strictly past it.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }
}
