//! Material Backends
//!
//! The remote data service behind the catalog, and an in-memory stand-in.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::Material;
use crate::classifier::BackendError;

// == Material Backend ==
/// Remote storage for material records.
#[async_trait]
pub trait MaterialBackend: Send + Sync {
    /// Fetches one material; unknown ids fail with a `PGRST116` error.
    async fn fetch(&self, id: &str) -> Result<Material, BackendError>;

    /// Lists materials, optionally restricted to one category, ordered by id.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Material>, BackendError>;

    /// Inserts a new material; duplicate ids fail with a `23505` error.
    async fn insert(&self, material: Material) -> Result<Material, BackendError>;
}

/// Shared, dynamically dispatched backend.
pub type SharedBackend = Arc<dyn MaterialBackend>;

// == In-Memory Backend ==
/// Backend keeping records in process memory.
///
/// Can inject transient network failures and an artificial latency to
/// exercise the retry and cache layers.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    records: RwLock<BTreeMap<String, Material>>,
    pending_failures: AtomicU32,
    calls: AtomicU32,
    latency: Duration,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-filled with a few sample records.
    pub fn seeded() -> Self {
        let samples = [
            Material::new("mat-001", "Carrara Marble", "stone").with_finish("polished"),
            Material::new("mat-002", "Absolute Black Granite", "stone").with_finish("honed"),
            Material::new("mat-003", "White Oak", "wood").with_finish("oiled"),
            Material::new("mat-004", "Brushed Brass", "metal"),
        ];
        Self {
            records: RwLock::new(
                samples
                    .into_iter()
                    .map(|m| (m.id.clone(), m))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes the next `count` calls fail with a transport error.
    pub fn fail_next(&self, count: u32) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    /// Number of calls received so far, failed ones included.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let injected = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(BackendError::transport("fetch failed: connection reset by peer"));
        }
        Ok(())
    }
}

#[async_trait]
impl MaterialBackend for InMemoryBackend {
    async fn fetch(&self, id: &str) -> Result<Material, BackendError> {
        self.enter().await?;
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| {
                BackendError::with_code(
                    "PGRST116",
                    "JSON object requested, multiple (or no) rows returned",
                )
                .details(format!("id = {}", id))
            })
    }

    async fn list(&self, category: Option<&str>) -> Result<Vec<Material>, BackendError> {
        self.enter().await?;
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|m| category.map_or(true, |c| m.category == c))
            .cloned()
            .collect())
    }

    async fn insert(&self, material: Material) -> Result<Material, BackendError> {
        self.enter().await?;
        let mut records = self.records.write().await;
        if records.contains_key(&material.id) {
            return Err(BackendError::with_code(
                "23505",
                "duplicate key value violates unique constraint \"materials_pkey\"",
            )
            .details(format!("Key (id)=({}) already exists.", material.id)));
        }
        records.insert(material.id.clone(), material.clone());
        Ok(material)
    }
}
