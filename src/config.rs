//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::error::ConfigError;
use crate::retry::RetryPolicy;
use crate::tasks::DEFAULT_SWEEP_INTERVAL;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Cache behavior shared by the catalog caches
    pub cache: CacheConfig,
    /// Default retry policy for backend calls
    pub retry: RetryPolicy,
    /// Period of the background expiry sweep
    pub sweep_interval: Duration,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_ENABLED` - `true`/`false` (default: true)
    /// - `SWEEP_INTERVAL` - Expiry sweep period in seconds (default: 30)
    /// - `RETRY_MAX_RETRIES` - Retries after the first attempt (default: 3)
    /// - `RETRY_INITIAL_DELAY_MS` - First backoff delay (default: 100)
    /// - `RETRY_BACKOFF_MULTIPLIER` - Backoff growth factor (default: 2.0)
    /// - `RETRY_MAX_DELAY_MS` - Backoff ceiling (default: 5000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Unset variables fall back to defaults; set but unparsable ones, or an
    /// invalid combination, are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache = CacheConfig {
            max_entries: parse_var(&lookup, "MAX_ENTRIES", defaults.cache.max_entries)?,
            default_ttl: Duration::from_secs(parse_var(
                &lookup,
                "DEFAULT_TTL",
                defaults.cache.default_ttl.as_secs(),
            )?),
            enabled: parse_var(&lookup, "CACHE_ENABLED", defaults.cache.enabled)?,
        };
        cache.validate()?;

        let retry = RetryPolicy {
            max_retries: parse_var(&lookup, "RETRY_MAX_RETRIES", defaults.retry.max_retries)?,
            initial_delay: Duration::from_millis(parse_var(
                &lookup,
                "RETRY_INITIAL_DELAY_MS",
                defaults.retry.initial_delay.as_millis() as u64,
            )?),
            backoff_multiplier: parse_var(
                &lookup,
                "RETRY_BACKOFF_MULTIPLIER",
                defaults.retry.backoff_multiplier,
            )?,
            max_delay: Duration::from_millis(parse_var(
                &lookup,
                "RETRY_MAX_DELAY_MS",
                defaults.retry.max_delay.as_millis() as u64,
            )?),
        };
        retry.validate()?;

        Ok(Self {
            cache,
            retry,
            sweep_interval: Duration::from_secs(parse_var(
                &lookup,
                "SWEEP_INTERVAL",
                defaults.sweep_interval.as_secs(),
            )?),
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            retry: RetryPolicy::default(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            server_port: 3000,
        }
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVariable {
            name: name.to_string(),
            value: raw,
        }),
    }
}
