//! Catalog Records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Material ==
/// A material record in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Free-form finish/texture description
    #[serde(default)]
    pub finish: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Material {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            finish: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_finish(mut self, finish: impl Into<String>) -> Self {
        self.finish = Some(finish.into());
        self
    }
}
