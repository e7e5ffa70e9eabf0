//! Error Classifier Module
//!
//! Maps raw errors from remote calls into typed classifications that decide
//! whether a failure is worth retrying.

mod classification;
mod remote;
mod rules;

pub use classification::{ErrorClassification, ErrorKind};
pub use remote::{BackendError, RemoteFailure};
pub use rules::classify;
