//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /materials/:id` - Fetch one material
//! - `GET /materials` - List materials
//! - `POST /materials` - Create a material
//! - `GET /stats` / `POST /stats/reset` - Cache statistics
//! - `DELETE /cache` / `DELETE /cache/:namespace` - Cache invalidation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
