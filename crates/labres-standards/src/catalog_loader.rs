//! Canonical test catalog loading.
//!
//! The catalog is a JSON array of test entries: stable code, display name,
//! optional unit, and the raw-name aliases collected so far. Categories are
//! not stored; they derive from the code prefix.

use std::path::Path;

use labres_model::{CanonicalTest, TestCatalog};
use serde::Deserialize;
use tracing::info;

use crate::error::{Result, StandardsError};

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    code: String,
    name: String,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

/// Load a test catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<TestCatalog> {
    let raw = std::fs::read_to_string(path).map_err(|source| StandardsError::io(path, source))?;
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(&raw).map_err(|source| StandardsError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let mut catalog = TestCatalog::new();
    for entry in entries {
        let code = entry.code.trim();
        if code.is_empty() {
            continue;
        }
        let mut test = CanonicalTest::new(code, entry.name.trim());
        test.unit = entry.unit.filter(|u| !u.trim().is_empty());
        for alias in entry.aliases {
            let alias = alias.trim();
            if !alias.is_empty() {
                test.add_alias(alias);
            }
        }
        catalog.insert(test);
    }
    info!(path = %path.display(), tests = catalog.len(), "loaded test catalog");
    Ok(catalog)
}
