//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::catalog::Material;

/// Response body for GET /materials
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub materials: Vec<Material>,
}

impl ListResponse {
    pub fn new(materials: Vec<Material>) -> Self {
        Self {
            count: materials.len(),
            materials,
        }
    }
}

/// Statistics of one cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsBody {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsBody {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Single-record cache
    pub records: CacheStatsBody,
    /// Listing cache
    pub listings: CacheStatsBody,
}

impl StatsResponse {
    pub fn new(records: CacheStats, listings: CacheStats) -> Self {
        Self {
            records: records.into(),
            listings: listings.into(),
        }
    }
}

/// Response body for cache invalidation and reset endpoints
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Success message
    pub message: String,
    /// Entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(message: impl Into<String>, removed: usize) -> Self {
        Self {
            message: message.into(),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
