//! Error types for the data-access layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::{ErrorClassification, ErrorKind};

// == Config Error ==
/// Rejected cache or retry configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_entries must be greater than zero")]
    ZeroCapacity,

    #[error("backoff_multiplier must be a finite number >= 1, got {0}")]
    InvalidMultiplier(f64),

    #[error("max_delay ({max_ms}ms) must not be shorter than initial_delay ({initial_ms}ms)")]
    DelayBounds { initial_ms: u128, max_ms: u128 },

    #[error("invalid value for {name}: {value}")]
    InvalidVariable { name: String, value: String },
}

// == Operation Error ==
/// Final error raised by the retry orchestrator.
///
/// Always names the failed operation and carries the classification of the
/// last failure, so callers can tell a permanent rejection from a transient
/// failure that was already retried.
#[derive(Error, Debug)]
pub enum OperationError {
    /// Non-retryable failure; no further attempts were made.
    #[error("{operation} failed after {attempts} attempt(s): {classification}")]
    Failed {
        operation: String,
        attempts: u32,
        classification: ErrorClassification,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Retryable failure that persisted through the whole retry budget.
    #[error("{operation} still failing after {attempts} attempt(s): {classification}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        classification: ErrorClassification,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Retry loop aborted by its cancellation token.
    #[error("{operation} cancelled after {attempts} attempt(s)")]
    Cancelled {
        operation: String,
        attempts: u32,
        classification: ErrorClassification,
    },
}

impl OperationError {
    pub fn classification(&self) -> &ErrorClassification {
        match self {
            OperationError::Failed { classification, .. }
            | OperationError::RetriesExhausted { classification, .. }
            | OperationError::Cancelled { classification, .. } => classification,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.classification().kind
    }

    pub fn operation(&self) -> &str {
        match self {
            OperationError::Failed { operation, .. }
            | OperationError::RetriesExhausted { operation, .. }
            | OperationError::Cancelled { operation, .. } => operation,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            OperationError::Failed { attempts, .. }
            | OperationError::RetriesExhausted { attempts, .. }
            | OperationError::Cancelled { attempts, .. } => *attempts,
        }
    }

    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self, OperationError::RetriesExhausted { .. })
    }
}

// == Api Error ==
/// Error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Failure of the underlying data operation
    #[error(transparent)]
    Operation(#[from] OperationError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ApiError::Operation(err) => {
                let status = match err.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Conflict => StatusCode::CONFLICT,
                    ErrorKind::Auth => StatusCode::UNAUTHORIZED,
                    ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
                    ErrorKind::Network => StatusCode::SERVICE_UNAVAILABLE,
                    ErrorKind::Unknown | ErrorKind::Cancelled => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, err.kind().as_str())
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify, BackendError};

    fn failed(err: BackendError) -> OperationError {
        let classification = classify(&err, "fetch_material", None);
        OperationError::Failed {
            operation: "fetch_material".to_string(),
            attempts: 1,
            classification,
            source: Box::new(err),
        }
    }

    #[test]
    fn test_operation_error_accessors() {
        let err = failed(BackendError::with_code("PGRST116", "no rows"));

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.operation(), "fetch_material");
        assert_eq!(err.attempts(), 1);
        assert!(!err.is_retries_exhausted());
        assert!(err.to_string().contains("fetch_material"));
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn test_operation_error_keeps_source() {
        use std::error::Error as _;

        let err = failed(BackendError::new("boom"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_api_error_status_mapping() {
        let not_found = ApiError::from(failed(BackendError::with_code("PGRST116", "no rows")));
        let conflict = ApiError::from(failed(BackendError::with_code("23505", "dup")));
        let invalid = ApiError::InvalidRequest("empty id".to_string());

        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
