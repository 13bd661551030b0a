//! Read-only reference data: the canonical test catalog and the scoped
//! reference-range table, loaded once per process and shared across runs.

pub mod catalog_loader;
pub mod error;
pub mod paths;
pub mod range_loader;

pub use catalog_loader::load_catalog;
pub use error::{Result, StandardsError};
pub use paths::{default_catalog_path, default_ranges_path, standards_root};
pub use range_loader::load_ranges;

use labres_model::{RangeTable, TestCatalog};

/// Load the default catalog and range table from the standards root.
pub fn load_default_standards() -> Result<(TestCatalog, RangeTable)> {
    let catalog = load_catalog(&default_catalog_path())?;
    let ranges = load_ranges(&default_ranges_path())?;
    Ok((catalog, ranges))
}
