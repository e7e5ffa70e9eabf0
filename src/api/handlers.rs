//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::catalog::{Material, MaterialService, SharedBackend};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};
use crate::models::{
    CreateMaterialRequest, HealthResponse, InvalidateResponse, ListQuery, ListResponse,
    StatsResponse,
};
use crate::retry::RetryOrchestrator;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached, retried catalog access
    pub service: Arc<MaterialService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: MaterialService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the catalog caches with their expiry sweeps, so it must be
    /// called from within a tokio runtime.
    pub fn from_config(
        config: &Config,
        backend: SharedBackend,
    ) -> std::result::Result<Self, ConfigError> {
        let service = MaterialService::start(
            backend,
            config.cache.clone(),
            config.sweep_interval,
            RetryOrchestrator::new(config.retry.clone()),
        )?;
        Ok(Self::new(service))
    }
}

/// Handler for GET /materials/:id
pub async fn get_material_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Material>> {
    let material = state.service.get_material(&id).await?;
    Ok(Json(material))
}

/// Handler for GET /materials
///
/// Lists materials, optionally filtered with `?category=`.
pub async fn list_materials_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let materials = state
        .service
        .list_materials(query.category.as_deref())
        .await?;
    Ok(Json(ListResponse::new(materials)))
}

/// Handler for POST /materials
pub async fn create_material_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateMaterialRequest>,
) -> Result<(StatusCode, Json<Material>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let created = state.service.create_material(req.into_material()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let (records, listings) = state.service.stats().await;
    Json(StatsResponse::new(records, listings))
}

/// Handler for POST /stats/reset
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    state.service.reset_stats().await;
    let (records, listings) = state.service.stats().await;
    Json(StatsResponse::new(records, listings))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let removed = state.service.clear().await;
    Json(InvalidateResponse::new("Cache cleared", removed))
}

/// Handler for DELETE /cache/:namespace
pub async fn invalidate_namespace_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    if namespace.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "Namespace cannot be empty".to_string(),
        ));
    }

    let removed = state.service.invalidate_namespace(&namespace).await;
    Ok(Json(InvalidateResponse::new(
        format!("Namespace '{}' invalidated", namespace),
        removed,
    )))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
