//! Standards directory discovery.

use std::path::PathBuf;

/// Get the standards root directory.
///
/// `LABRES_STANDARDS_DIR` overrides the default, which is the `standards/`
/// directory at the workspace root.
pub fn standards_root() -> PathBuf {
    if let Ok(root) = std::env::var("LABRES_STANDARDS_DIR") {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

/// Default path of the canonical test catalog.
pub fn default_catalog_path() -> PathBuf {
    standards_root().join("catalog.json")
}

/// Default path of the reference-range table.
pub fn default_ranges_path() -> PathBuf {
    standards_root().join("reference_ranges.csv")
}
