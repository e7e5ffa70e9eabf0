//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with an expiry index for
//! soonest-to-expire eviction and TTL sweeping.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::key::namespace_prefix;
use crate::cache::{CacheConfig, CacheEntry, CacheStats, Clock, ExpiryIndex, SystemClock};
use crate::error::ConfigError;

// == Cache Store ==
/// Bounded key-value store with per-entry expiry.
///
/// When full, inserting a new key evicts the entry with the smallest
/// `expires_at` (not the least recently used one).
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Keys ordered by expiry
    expiry: ExpiryIndex,
    /// Performance statistics
    stats: CacheStats,
    /// Active configuration
    config: CacheConfig,
    /// Time source for expiry
    clock: Arc<dyn Clock>,
    /// Next insertion sequence number
    next_seq: u64,
}

impl<T: Clone> CacheStore<T> {
    // == Constructor ==
    /// Creates a new CacheStore on the wall clock.
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            expiry: ExpiryIndex::new(),
            stats: CacheStats::new(),
            config,
            clock,
            next_seq: 0,
        })
    }

    // == Set ==
    /// Stores a value with optional TTL (the configured default when `None`).
    ///
    /// No-op while the cache is disabled. Overwriting a key replaces its value
    /// and expiry without evicting anything; inserting a new key into a full
    /// store evicts the soonest-to-expire entry first.
    pub fn set(&mut self, key: impl Into<String>, value: T, ttl: Option<Duration>) {
        if !self.config.enabled {
            return;
        }

        let key = key.into();
        let is_overwrite = self.remove_entry(&key).is_some();

        if !is_overwrite {
            while self.entries.len() >= self.config.max_entries {
                if self.evict_soonest().is_none() {
                    break;
                }
            }
        }

        let ttl = ttl.unwrap_or(self.config.default_ttl);
        let seq = self.next_seq;
        self.next_seq += 1;

        let entry = CacheEntry::new(key.clone(), value, ttl, self.clock.now_ms(), seq);
        self.expiry.insert(entry.expires_at, entry.seq, &key);
        self.entries.insert(key, entry);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// Absent, expired, or disabled lookups count as misses. An expired entry
    /// is removed as a side effect.
    pub fn get(&mut self, key: &str) -> Option<T> {
        if !self.config.enabled {
            self.stats.record_miss();
            return None;
        }

        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            debug!(key, "Lazily removed expired entry");
        }
        self.stats.record_miss();
        None
    }

    // == Contains Key ==
    /// Whether a live entry exists, without touching statistics.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.config.enabled
            && self
                .entries
                .get(key)
                .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Invalidate ==
    /// Removes an entry if present. Returns whether anything was removed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Invalidate Namespace ==
    /// Removes every entry whose key was generated under `namespace`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_namespace(&mut self, namespace: &str) -> usize {
        let prefix = namespace_prefix(namespace);
        let keys: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .cloned()
            .collect();

        for key in &keys {
            self.remove_entry(key);
        }
        keys.len()
    }

    // == Clear ==
    /// Removes all entries. Statistics are left untouched.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.expiry.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Zeroes hit, miss, and eviction counters.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Reconfigure ==
    /// Replaces the active configuration.
    ///
    /// Existing entries keep their expiry. Shrinking `max_entries` trims
    /// soonest-to-expire entries down to the new bound; disabling the cache
    /// drops every entry.
    pub fn reconfigure(&mut self, config: CacheConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;

        if !self.config.enabled {
            self.clear();
            return Ok(());
        }
        while self.entries.len() > self.config.max_entries {
            if self.evict_soonest().is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired = self.expiry.drain_expired(self.clock.now_ms());
        for key in &expired {
            self.entries.remove(key);
        }

        self.stats.set_total_entries(self.entries.len());
        expired.len()
    }

    // == Length ==
    /// Returns the current number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<T>> {
        let entry = self.entries.remove(key)?;
        self.expiry.remove(entry.expires_at, entry.seq, key);
        self.stats.set_total_entries(self.entries.len());
        Some(entry)
    }

    fn evict_soonest(&mut self) -> Option<String> {
        let key = self.expiry.pop_soonest()?;
        self.entries.remove(&key);
        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        debug!(key = %key, "Evicted soonest-to-expire entry");
        Some(key)
    }
}
