//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, create_material_handler, get_material_handler, health_handler,
    invalidate_namespace_handler, list_materials_handler, reset_stats_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /materials/:id` - Fetch one material (cached)
/// - `GET /materials` - List materials, `?category=` filter (cached)
/// - `POST /materials` - Create a material
/// - `GET /stats` - Cache statistics
/// - `POST /stats/reset` - Reset cache statistics
/// - `DELETE /cache` - Drop every cached entry
/// - `DELETE /cache/:namespace` - Drop one namespace
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/materials",
            get(list_materials_handler).post(create_material_handler),
        )
        .route("/materials/:id", get(get_material_handler))
        .route("/stats", get(stats_handler))
        .route("/stats/reset", post(reset_stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/cache/:namespace", delete(invalidate_namespace_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
