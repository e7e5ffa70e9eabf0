//! Cache Configuration
//!
//! Immutable configuration snapshot for one cache instance.

use std::time::Duration;

use crate::error::ConfigError;

/// Default TTL applied when `set` is called without one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default capacity bound.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

// == Cache Config ==
/// Cache behavior parameters.
///
/// Replaced wholesale by [`CacheStore::reconfigure`](crate::cache::CacheStore::reconfigure).
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// TTL for entries stored without an explicit one
    pub default_ttl: Duration,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// When false, `set` is a no-op and `get` always misses
    pub enabled: bool,
}

impl CacheConfig {
    /// Creates a validated configuration.
    pub fn new(default_ttl: Duration, max_entries: usize, enabled: bool) -> Result<Self, ConfigError> {
        let config = Self {
            default_ttl,
            max_entries,
            enabled,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations that cannot be honored at call time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Same configuration with the cache switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
            enabled: true,
        }
    }
}
