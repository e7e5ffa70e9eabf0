//! Catalog Module
//!
//! Material records served through the cache-aside and retry layers.

mod backend;
mod model;
mod service;

pub use backend::{InMemoryBackend, MaterialBackend, SharedBackend};
pub use model::Material;
pub use service::{MaterialService, MATERIALS_NAMESPACE};
