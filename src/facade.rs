//! Cache-Aside Facade
//!
//! Consults the cache before invoking a remote operation and stores the
//! result after a miss.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cache::{generate_key, CacheConfig, SharedCache};
use crate::error::ConfigError;
use crate::params::Params;
use crate::tasks::Sweeper;

// == Cache Aside ==
/// Read-through cache over arbitrary async operations.
///
/// Owns its cache and, when built with [`CacheAside::start`], the expiry
/// sweep for it. Independent instances share nothing.
#[derive(Debug)]
pub struct CacheAside<T> {
    cache: SharedCache<T>,
    sweeper: Option<Sweeper>,
}

impl<T> CacheAside<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wraps an existing cache without starting a sweep.
    pub fn new(cache: SharedCache<T>) -> Self {
        Self {
            cache,
            sweeper: None,
        }
    }

    /// Builds a cache from `config` and starts sweeping it every `sweep_interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: CacheConfig, sweep_interval: Duration) -> Result<Self, ConfigError> {
        let cache = SharedCache::from_config(config)?;
        Ok(Self::with_sweeper(cache, sweep_interval))
    }

    /// Wraps `cache` and starts sweeping it every `sweep_interval`.
    pub fn with_sweeper(cache: SharedCache<T>, sweep_interval: Duration) -> Self {
        let sweeper = Sweeper::spawn(cache.clone(), sweep_interval);
        Self {
            cache,
            sweeper: Some(sweeper),
        }
    }

    /// The underlying cache, for invalidation and statistics.
    pub fn cache(&self) -> &SharedCache<T> {
        &self.cache
    }

    // == With Cache ==
    /// Returns the cached result for `(namespace, operation_name, params)` or
    /// computes it with `operation`.
    ///
    /// `operation` is never called on a hit. On a miss its success is stored
    /// with `ttl` (the cache default when `None`); its error is returned
    /// unchanged and nothing is cached.
    pub async fn with_cache<E, F, Fut>(
        &self,
        namespace: &str,
        operation_name: &str,
        params: &Params,
        operation: F,
        ttl: Option<Duration>,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = generate_key(namespace, operation_name, params);

        if let Some(value) = self.cache.get(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        debug!(key = %key, "Cache miss");
        let value = operation().await?;
        self.cache.set(key, value.clone(), ttl).await;
        Ok(value)
    }

    /// Drops every cached result under `namespace`.
    pub async fn invalidate_namespace(&self, namespace: &str) -> usize {
        self.cache.invalidate_namespace(namespace).await
    }

    /// Stops the expiry sweep, if one is running.
    pub async fn shutdown(mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.shutdown().await;
        }
    }
}
