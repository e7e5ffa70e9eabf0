//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and soonest-to-expire
//! eviction.

mod clock;
mod config;
mod entry;
mod expiry;
mod key;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
pub use entry::CacheEntry;
pub use expiry::ExpiryIndex;
pub use key::{generate_key, namespace_prefix, KEY_SEPARATOR};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;
