//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the cache.
//!
//! # Tasks
//! - Expiry sweep: Removes expired cache entries at a fixed period

mod sweeper;

pub use sweeper::{Sweeper, DEFAULT_SWEEP_INTERVAL};
