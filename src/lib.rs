//! Resilient Access - cached, retried access to a remote data service
//!
//! Classifies backend failures, retries the transient ones with capped
//! exponential backoff, and serves repeated reads from a TTL cache with
//! bounded capacity.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod params;
pub mod retry;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{CacheConfig, CacheStats, CacheStore, SharedCache};
pub use classifier::{classify, BackendError, ErrorClassification, ErrorKind, RemoteFailure};
pub use config::Config;
pub use error::{ApiError, ConfigError, OperationError};
pub use facade::CacheAside;
pub use params::{ParamValue, Params};
pub use retry::{RetryOrchestrator, RetryPolicy};
pub use tasks::Sweeper;
