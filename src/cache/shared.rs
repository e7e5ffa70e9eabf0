//! Shared Cache Handle
//!
//! Cloneable async handle to one [`CacheStore`], safe to use from many tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheConfig, CacheStats, CacheStore};
use crate::error::ConfigError;

// == Shared Cache ==
/// Thread-safe handle around a cache store.
///
/// Every operation runs under the store lock, so no caller observes a
/// partially applied mutation and sweeps never interleave with lookups.
/// Clones point at the same store.
#[derive(Debug)]
pub struct SharedCache<T> {
    inner: Arc<RwLock<CacheStore<T>>>,
}

impl<T> Clone for SharedCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> SharedCache<T> {
    /// Wraps an existing store.
    pub fn new(store: CacheStore<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Builds a store on the wall clock and wraps it.
    pub fn from_config(config: CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(CacheStore::new(config)?))
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        // Write lock: lookups update stats and may lazily delete.
        self.inner.write().await.get(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: T, ttl: Option<Duration>) {
        self.inner.write().await.set(key, value, ttl);
    }

    pub async fn contains_key(&self, key: &str) -> bool {
        self.inner.read().await.contains_key(key)
    }

    pub async fn invalidate(&self, key: &str) -> bool {
        self.inner.write().await.invalidate(key)
    }

    pub async fn invalidate_namespace(&self, namespace: &str) -> usize {
        self.inner.write().await.invalidate_namespace(namespace)
    }

    pub async fn clear(&self) -> usize {
        self.inner.write().await.clear()
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn reset_stats(&self) {
        self.inner.write().await.reset_stats();
    }

    pub async fn reconfigure(&self, config: CacheConfig) -> Result<(), ConfigError> {
        self.inner.write().await.reconfigure(config)
    }

    pub async fn config(&self) -> CacheConfig {
        self.inner.read().await.config().clone()
    }

    pub async fn sweep_expired(&self) -> usize {
        self.inner.write().await.sweep_expired()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
