//! Material Service
//!
//! Catalog data access with read-through caching and retries.

use std::time::Duration;

use tracing::info;

use crate::cache::{CacheConfig, CacheStats, SharedCache};
use crate::catalog::{Material, SharedBackend};
use crate::error::{ConfigError, OperationError};
use crate::facade::CacheAside;
use crate::params::Params;
use crate::retry::RetryOrchestrator;

/// Cache namespace for catalog reads.
pub const MATERIALS_NAMESPACE: &str = "materials";

// == Material Service ==
/// Reads go through the cache with the backend call retried on transient
/// failures; writes are retried and invalidate cached listings.
pub struct MaterialService {
    backend: SharedBackend,
    records: CacheAside<Material>,
    listings: CacheAside<Vec<Material>>,
    retrier: RetryOrchestrator,
}

impl MaterialService {
    /// Wires the service from already-built parts.
    pub fn new(
        backend: SharedBackend,
        records: CacheAside<Material>,
        listings: CacheAside<Vec<Material>>,
        retrier: RetryOrchestrator,
    ) -> Self {
        Self {
            backend,
            records,
            listings,
            retrier,
        }
    }

    /// Builds both caches from `config` with running expiry sweeps.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        backend: SharedBackend,
        config: CacheConfig,
        sweep_interval: Duration,
        retrier: RetryOrchestrator,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            backend,
            CacheAside::start(config.clone(), sweep_interval)?,
            CacheAside::start(config, sweep_interval)?,
            retrier,
        ))
    }

    // == Get ==
    pub async fn get_material(&self, id: &str) -> Result<Material, OperationError> {
        let params = Params::new().with("id", id);
        let backend = &self.backend;

        self.records
            .with_cache(
                MATERIALS_NAMESPACE,
                "get",
                &params,
                || {
                    self.retrier.retry_with_context(
                        || backend.fetch(id),
                        "get_material",
                        None,
                        params.clone(),
                    )
                },
                None,
            )
            .await
    }

    // == List ==
    pub async fn list_materials(&self, category: Option<&str>) -> Result<Vec<Material>, OperationError> {
        let params = Params::new().with("category", category);
        let backend = &self.backend;

        self.listings
            .with_cache(
                MATERIALS_NAMESPACE,
                "list",
                &params,
                || {
                    self.retrier.retry_with_context(
                        || backend.list(category),
                        "list_materials",
                        None,
                        params.clone(),
                    )
                },
                None,
            )
            .await
    }

    // == Create ==
    /// Inserts a material and drops cached listings, which no longer match.
    pub async fn create_material(&self, material: Material) -> Result<Material, OperationError> {
        let context = Params::new().with("id", material.id.as_str());
        let backend = &self.backend;

        let created = self
            .retrier
            .retry_with_context(
                || backend.insert(material.clone()),
                "create_material",
                None,
                context,
            )
            .await?;

        let dropped = self.listings.invalidate_namespace(MATERIALS_NAMESPACE).await;
        info!(id = %created.id, dropped, "Material created, listings invalidated");
        Ok(created)
    }

    // == Cache Administration ==
    pub fn record_cache(&self) -> &SharedCache<Material> {
        self.records.cache()
    }

    pub fn listing_cache(&self) -> &SharedCache<Vec<Material>> {
        self.listings.cache()
    }

    /// Statistics of the record and listing caches, in that order.
    pub async fn stats(&self) -> (CacheStats, CacheStats) {
        (
            self.records.cache().stats().await,
            self.listings.cache().stats().await,
        )
    }

    pub async fn reset_stats(&self) {
        self.records.cache().reset_stats().await;
        self.listings.cache().reset_stats().await;
    }

    /// Invalidates `namespace` in both caches; returns entries removed.
    pub async fn invalidate_namespace(&self, namespace: &str) -> usize {
        self.records.invalidate_namespace(namespace).await
            + self.listings.invalidate_namespace(namespace).await
    }

    /// Empties both caches; returns entries removed.
    pub async fn clear(&self) -> usize {
        self.records.cache().clear().await + self.listings.cache().clear().await
    }

    /// Stops the expiry sweeps.
    pub async fn shutdown(self) {
        self.records.shutdown().await;
        self.listings.shutdown().await;
    }
}
