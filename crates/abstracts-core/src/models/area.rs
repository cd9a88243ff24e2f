use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{DEFAULT_AREAS_VERSION, DEFAULT_SUBMISSION_AREAS};

/// Versioned enumeration of the topical areas a submission may select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AreaCatalog {
    /// Catalog revision, bumped whenever the area list changes
    #[schema(example = "2025.1")]
    version: String,
    areas: Vec<String>,
}

impl AreaCatalog {
    /// Build a catalog, dropping blank and repeated entries while keeping order.
    pub fn new(version: impl Into<String>, areas: impl IntoIterator<Item = String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for area in areas {
            let area = area.trim().to_string();
            if !area.is_empty() && !unique.contains(&area) {
                unique.push(area);
            }
        }
        Self {
            version: version.into(),
            areas: unique,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn contains(&self, area: &str) -> bool {
        self.areas.iter().any(|a| a == area)
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

impl Default for AreaCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_AREAS_VERSION,
            DEFAULT_SUBMISSION_AREAS.iter().map(|a| a.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_eleven_areas() {
        let catalog = AreaCatalog::default();
        assert_eq!(catalog.areas().len(), 11);
        assert_eq!(catalog.version(), "2025.1");
        assert!(catalog.contains("Corrosão"));
        assert!(catalog.contains("Outras"));
        assert!(!catalog.contains("corrosão"));
    }

    #[test]
    fn test_new_catalog_trims_and_dedups() {
        let catalog = AreaCatalog::new(
            "2026.1",
            vec![
                " Corrosão ".to_string(),
                "".to_string(),
                "Corrosão".to_string(),
                "Biomateriais".to_string(),
            ],
        );
        assert_eq!(catalog.areas(), ["Corrosão", "Biomateriais"]);
        assert_eq!(catalog.version(), "2026.1");
    }
}
