//! Instrument catalog loading.
//!
//! The reference catalog is embedded in the binary at compile time. A user
//! catalog with the same JSON schema can be loaded from disk instead.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::{Catalog, ReferenceItem};

/// Catalog schema shared by the embedded file and user files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: String,
    /// Instruments in catalog order
    pub instruments: Vec<ReferenceItem>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl CatalogFile {
    /// Converts the file contents into a validated catalog.
    pub fn into_catalog(self) -> Result<Catalog> {
        Catalog::from_items(self.instruments).context("Catalog contains an invalid instrument")
    }
}

/// Loads the embedded reference catalog.
pub fn load_builtin() -> Result<Catalog> {
    let json_data = include_str!("instruments.json");
    let file: CatalogFile =
        serde_json::from_str(json_data).context("Failed to parse embedded instruments.json")?;
    file.into_catalog()
}

/// Loads a catalog from a JSON file.
pub fn load_from_file(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read catalog file: {}", path.display()))?;

    let file: CatalogFile = serde_json::from_str(&content)
        .context(format!("Failed to parse catalog file: {}", path.display()))?;

    let catalog = file.into_catalog()?;
    tracing::debug!(
        "Loaded {} instruments from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Loads the catalog at `path` if given, the embedded one otherwise.
pub fn load(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => load_from_file(path),
        None => load_builtin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = load_builtin().unwrap();
        assert_eq!(catalog.len(), 9);

        let tuba = catalog.get("ROMAN_TUBA").unwrap();
        assert_eq!(tuba.diameter_mm, 22.0);
        assert_eq!(tuba.frequency_hz, 98.0);
        assert_eq!(tuba.culture.as_deref(), Some("Roman"));

        // Catalog order follows the file
        assert_eq!(catalog.iter().next().unwrap().name, "TIBETAN_DUNG_CHEN_LONG");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"instruments": [{"name": "A", "diameter_mm": 26.2, "frequency_hz": 50.0}]}"#,
        )
        .unwrap();

        let catalog = load(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("A").unwrap().diameter_mm, 26.2);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_item() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"instruments": [{"name": "A", "diameter_mm": -1.0, "frequency_hz": 50.0}]}"#,
        )
        .unwrap();

        assert!(load_from_file(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_from_file(Path::new("/nonexistent/catalog.json"));
        assert!(result.is_err());
    }
}
