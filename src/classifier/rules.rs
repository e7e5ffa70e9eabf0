//! Classification Rules
//!
//! Ordered rules mapping a raw remote failure to an [`ErrorClassification`].
//! The first matching rule wins; anything unrecognized is `Unknown` and is
//! not retried.

use crate::classifier::{ErrorClassification, ErrorKind, RemoteFailure};
use crate::params::Params;

// == Signal Tables ==
/// SQLSTATE class 23: integrity constraint violation.
const INTEGRITY_CODE_CLASS: &str = "23";

/// PostgREST "JSON object requested, multiple (or no) rows returned".
const NO_ROWS_CODE: &str = "PGRST116";

const AUTH_STATUSES: [u16; 2] = [401, 403];
const AUTH_MESSAGES: [&str; 6] = [
    "invalid credentials",
    "invalid login credentials",
    "invalid api key",
    "jwt expired",
    "invalid jwt",
    "unauthorized",
];

const RATE_LIMIT_STATUS: u16 = 429;
const RATE_LIMIT_MESSAGES: [&str; 3] = ["rate limit", "too many requests", "quota exceeded"];

const GATEWAY_STATUSES: [u16; 3] = [502, 503, 504];
const NETWORK_MESSAGES: [&str; 11] = [
    "fetch failed",
    "network",
    "econnreset",
    "econnrefused",
    "enotfound",
    "etimedout",
    "connection reset",
    "connection refused",
    "dns",
    "timed out",
    "timeout",
];

// == Classify ==
/// Classifies a failed remote call.
///
/// Never fails. The original error message is embedded verbatim in the
/// returned `message`, and `context` is carried through unchanged.
pub fn classify<E>(error: &E, operation: &str, context: Option<Params>) -> ErrorClassification
where
    E: RemoteFailure + ?Sized,
{
    let original = error.to_string();
    let kind = detect_kind(error, &original.to_lowercase());

    let message = match kind {
        ErrorKind::Conflict => format!("Conflict in {}: {}", operation, original),
        ErrorKind::Auth => format!("Authentication failed in {}: {}", operation, original),
        ErrorKind::NotFound => format!("Not found in {}: {}", operation, original),
        ErrorKind::RateLimit => format!("Rate limited in {}: {}", operation, original),
        ErrorKind::Network => format!("Network error in {}: {}", operation, original),
        ErrorKind::Unknown | ErrorKind::Cancelled => {
            format!("Unexpected error in {}: {}", operation, original)
        }
    };

    ErrorClassification {
        kind,
        message,
        operation: operation.to_string(),
        context: context.unwrap_or_default(),
        retryable: kind.is_retryable(),
    }
}

fn detect_kind<E>(error: &E, lowered: &str) -> ErrorKind
where
    E: RemoteFailure + ?Sized,
{
    let code = error.code();
    let status = error.status();
    let mentions = |needles: &[&str]| needles.iter().any(|n| lowered.contains(n));

    if code.is_some_and(|c| c.len() == 5 && c.starts_with(INTEGRITY_CODE_CLASS)) {
        ErrorKind::Conflict
    } else if status.is_some_and(|s| AUTH_STATUSES.contains(&s)) || mentions(&AUTH_MESSAGES) {
        ErrorKind::Auth
    } else if code == Some(NO_ROWS_CODE) || status == Some(404) {
        ErrorKind::NotFound
    } else if status == Some(RATE_LIMIT_STATUS) || mentions(&RATE_LIMIT_MESSAGES) {
        ErrorKind::RateLimit
    } else if error.is_transport()
        || status.is_some_and(|s| GATEWAY_STATUSES.contains(&s))
        || mentions(&NETWORK_MESSAGES)
    {
        ErrorKind::Network
    } else {
        ErrorKind::Unknown
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::BackendError;
    use std::io;

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = BackendError::with_code("23505", "duplicate key value violates unique constraint");
        let c = classify(&err, "create_material", None);

        assert_eq!(c.kind, ErrorKind::Conflict);
        assert!(!c.retryable);
        assert!(c.message.contains("duplicate key value violates unique constraint"));
        assert_eq!(c.operation, "create_material");
    }

    #[test]
    fn test_foreign_key_violation_is_conflict() {
        let err = BackendError::with_code("23503", "violates foreign key constraint");
        assert_eq!(classify(&err, "op", None).kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_401_is_auth() {
        let err = BackendError::with_status(401, "JWT missing");
        let c = classify(&err, "fetch_material", None);

        assert_eq!(c.kind, ErrorKind::Auth);
        assert!(!c.retryable);
        assert!(c.message.contains("JWT missing"));
    }

    #[test]
    fn test_403_and_credentials_message_are_auth() {
        let forbidden = BackendError::with_status(403, "forbidden");
        let creds = BackendError::new("Invalid login credentials");

        assert_eq!(classify(&forbidden, "op", None).kind, ErrorKind::Auth);
        assert_eq!(classify(&creds, "op", None).kind, ErrorKind::Auth);
    }

    #[test]
    fn test_no_rows_is_not_found() {
        let err = BackendError::with_code("PGRST116", "JSON object requested, multiple (or no) rows returned");
        let c = classify(&err, "fetch_material", None);

        assert_eq!(c.kind, ErrorKind::NotFound);
        assert!(!c.retryable);
    }

    #[test]
    fn test_429_is_rate_limit() {
        let err = BackendError::with_status(429, "slow down");
        let c = classify(&err, "list_materials", None);

        assert_eq!(c.kind, ErrorKind::RateLimit);
        assert!(c.retryable);
    }

    #[test]
    fn test_network_message_is_network() {
        let err = BackendError::new("TypeError: fetch failed");
        let c = classify(&err, "list_materials", None);

        assert_eq!(c.kind, ErrorKind::Network);
        assert!(c.retryable);
        assert!(c.message.contains("TypeError: fetch failed"));
    }

    #[test]
    fn test_transport_flag_and_io_error_are_network() {
        let flagged = BackendError::transport("peer went away");
        let io_err = io::Error::new(io::ErrorKind::ConnectionReset, "reset");

        assert_eq!(classify(&flagged, "op", None).kind, ErrorKind::Network);
        assert_eq!(classify(&io_err, "op", None).kind, ErrorKind::Network);
    }

    #[test]
    fn test_gateway_status_is_network() {
        let err = BackendError::with_status(503, "service unavailable");
        assert_eq!(classify(&err, "op", None).kind, ErrorKind::Network);
    }

    #[test]
    fn test_unrecognized_is_unknown_and_not_retryable() {
        let err = BackendError::with_status(500, "something odd happened");
        let c = classify(&err, "op", None);

        assert_eq!(c.kind, ErrorKind::Unknown);
        assert!(!c.retryable);
        assert!(c.message.contains("something odd happened"));
    }

    #[test]
    fn test_conflict_code_wins_over_other_signals() {
        // An integrity violation that also mentions a timeout is still a conflict.
        let err = BackendError {
            status: Some(429),
            ..BackendError::with_code("23505", "timeout while checking duplicate key")
        };
        assert_eq!(classify(&err, "op", None).kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_auth_wins_over_not_found() {
        let err = BackendError {
            status: Some(401),
            ..BackendError::with_code("PGRST116", "no rows")
        };
        assert_eq!(classify(&err, "op", None).kind, ErrorKind::Auth);
    }

    #[test]
    fn test_context_copied_through() {
        let ctx = Params::new().with("material_id", "m-42").with("attempt", 1);
        let err = BackendError::new("boom");
        let c = classify(&err, "op", Some(ctx.clone()));

        assert_eq!(c.context, ctx);
    }

    #[test]
    fn test_missing_context_is_empty() {
        let c = classify(&BackendError::new("boom"), "op", None);
        assert!(c.context.is_empty());
    }
}
