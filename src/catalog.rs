//! Celestial catalog
//!
//! An ordered list of planet definitions consumed once when a world is
//! generated. The order is preserved into the world's celestial sequence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Bundled default catalog
const BUILTIN_JSON: &str = include_str!("../assets/celestials.json");

/// A validated celestial definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelestialDef {
    pub name: String,
    pub description: String,
    /// Decorative image key; `None` falls back to the numbered default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CelestialDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image: None,
        }
    }
}

/// Raw entry as it appears in the JSON file. Every field is optional here so
/// that a missing field can be reported by name and index.
#[derive(Debug, Deserialize)]
struct RawEntry {
    name: Option<String>,
    description: Option<String>,
    image: Option<String>,
}

/// Ordered celestial definitions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CelestialDef>,
}

impl Catalog {
    pub fn new(entries: Vec<CelestialDef>) -> Self {
        Self { entries }
    }

    /// The bundled solar system catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_JSON)
    }

    /// Parse and validate a JSON array of `{name, description, image?}`
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEntry> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                Ok(CelestialDef {
                    name: required(entry.name, index, "name")?,
                    description: required(entry.description, index, "description")?,
                    image: entry.image.filter(|s| !s.trim().is_empty()),
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        if entries.is_empty() {
            log::warn!("Catalog is empty; the world will have nothing to discover");
        }
        Ok(Self { entries })
    }

    /// Read a catalog file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        log::info!("Loaded {} celestials from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CelestialDef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn required(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, CatalogError> {
    match value {
        None => Err(CatalogError::MissingField { index, field }),
        Some(s) if s.trim().is_empty() => Err(CatalogError::EmptyField { index, field }),
        Some(s) => Ok(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.entries()[0].name, "Mercury");
        assert_eq!(catalog.entries()[7].name, "Neptune");
    }

    #[test]
    fn test_order_and_image_preserved() {
        let json = r#"[
            {"name": "B", "description": "second letter", "image": "b.png"},
            {"name": "A", "description": "first letter"}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let names: Vec<_> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(catalog.entries()[0].image.as_deref(), Some("b.png"));
        assert_eq!(catalog.entries()[1].image, None);
    }

    #[test]
    fn test_missing_description_is_reported() {
        let json = r#"[{"name": "A", "description": "ok"}, {"name": "B"}]"#;
        match Catalog::from_json_str(json) {
            Err(CatalogError::MissingField { index, field }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "description");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_blank_name_is_reported() {
        let json = r#"[{"name": "  ", "description": "nameless"}]"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::EmptyField { index, field }) if index == 0 && field == "name"
        ));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        assert!(matches!(
            Catalog::from_json_str(r#"{"name": "not a list"}"#),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"[{"name": 3, "description": "x"}]"#),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Catalog::load("/nonexistent/celestials.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/celestials.json"));
    }
}
