//! Error Classification Types

use std::fmt;

use serde::Serialize;

use crate::params::Params;

// == Error Kind ==
/// Category of a remote failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Conflict,
    Auth,
    NotFound,
    RateLimit,
    Network,
    Unknown,
    /// Produced by the retry orchestrator, never by the classifier.
    Cancelled,
}

impl ErrorKind {
    /// Whether a failure of this kind is transient and safe to retry.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::RateLimit | ErrorKind::Network)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Conflict => "conflict",
            ErrorKind::Auth => "auth",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Network => "network",
            ErrorKind::Unknown => "unknown",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Error Classification ==
/// Typed description of a failed remote call.
///
/// Built fresh for every classification and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorClassification {
    pub kind: ErrorKind,
    /// Human-readable message; always contains the original error message.
    pub message: String,
    /// Logical operation that failed.
    pub operation: String,
    pub context: Params,
    pub retryable: bool,
}

impl ErrorClassification {
    /// Classification used when a retry sequence is cancelled.
    pub fn cancelled(operation: &str, context: Params) -> Self {
        Self {
            kind: ErrorKind::Cancelled,
            message: format!("Operation '{}' was cancelled", operation),
            operation: operation.to_string(),
            context,
            retryable: false,
        }
    }
}

impl fmt::Display for ErrorClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
