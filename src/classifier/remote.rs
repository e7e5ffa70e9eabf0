//! Remote Failure Module
//!
//! The shape of an error raised by a remote call, as seen by the classifier.

use std::io;

use thiserror::Error;

// == Remote Failure ==
/// Structured signals a remote error may carry.
///
/// Every method is optional; the classifier falls back to the error's
/// `Display` message when no structured signal is present.
pub trait RemoteFailure: std::error::Error {
    /// Backend error code (e.g. a Postgres SQLSTATE or a PostgREST code).
    fn code(&self) -> Option<&str> {
        None
    }

    /// HTTP-style status code.
    fn status(&self) -> Option<u16> {
        None
    }

    /// True when the failure happened below the application protocol.
    fn is_transport(&self) -> bool {
        false
    }
}

// == Backend Error ==
/// Error returned by a remote data service.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct BackendError {
    pub code: Option<String>,
    pub status: Option<u16>,
    pub message: String,
    pub details: Option<String>,
    pub transport: bool,
}

impl BackendError {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            status: None,
            message: message.into(),
            details: None,
            transport: false,
        }
    }

    /// Creates an error with a backend error code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::new(message)
        }
    }

    /// Creates an error with an HTTP status.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(message)
        }
    }

    /// Creates a transport-level failure (reset connection, DNS, timeout).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            transport: true,
            ..Self::new(message)
        }
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl RemoteFailure for BackendError {
    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn status(&self) -> Option<u16> {
        self.status
    }

    fn is_transport(&self) -> bool {
        self.transport
    }
}

impl RemoteFailure for io::Error {
    fn is_transport(&self) -> bool {
        matches!(
            self.kind(),
            io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionRefused
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::NotConnected
                | io::ErrorKind::BrokenPipe
                | io::ErrorKind::TimedOut
                | io::ErrorKind::UnexpectedEof
        )
    }
}
