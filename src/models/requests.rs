//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::Utc;
use serde::Deserialize;

use crate::catalog::Material;

/// Maximum accepted length of a material id.
pub const MAX_ID_LENGTH: usize = 64;

/// Request body for POST /materials
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialRequest {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub finish: Option<String>,
}

impl CreateMaterialRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("Material id cannot be empty".to_string());
        }
        if self.id.len() > MAX_ID_LENGTH {
            return Some(format!(
                "Material id exceeds maximum length of {} characters",
                MAX_ID_LENGTH
            ));
        }
        if self.name.trim().is_empty() {
            return Some("Material name cannot be empty".to_string());
        }
        if self.category.trim().is_empty() {
            return Some("Material category cannot be empty".to_string());
        }
        None
    }

    pub fn into_material(self) -> Material {
        Material {
            id: self.id,
            name: self.name,
            category: self.category,
            finish: self.finish,
            updated_at: Utc::now(),
        }
    }
}

/// Query string for GET /materials
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: &str, name: &str) -> CreateMaterialRequest {
        CreateMaterialRequest {
            id: id.to_string(),
            name: name.to_string(),
            category: "stone".to_string(),
            finish: None,
        }
    }

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"id": "mat-9", "name": "Slate", "category": "stone"}"#;
        let req: CreateMaterialRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, "mat-9");
        assert!(req.finish.is_none());
    }

    #[test]
    fn test_validate_empty_id() {
        assert!(request("  ", "Slate").validate().is_some());
    }

    #[test]
    fn test_validate_long_id() {
        assert!(request(&"x".repeat(MAX_ID_LENGTH + 1), "Slate").validate().is_some());
    }

    #[test]
    fn test_validate_empty_name() {
        assert!(request("mat-9", "").validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = request("mat-9", "Slate");
        assert!(req.validate().is_none());
        assert_eq!(req.into_material().name, "Slate");
    }
}
