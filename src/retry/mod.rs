//! Retry Module
//!
//! Error-classifying retries with exponential backoff.

mod orchestrator;
mod policy;

pub use orchestrator::RetryOrchestrator;
pub use policy::{
    RetryPolicy, DEFAULT_BACKOFF_MULTIPLIER, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_DELAY,
    DEFAULT_MAX_RETRIES,
};
