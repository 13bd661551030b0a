//! Loader tests against the in-repo standards files.

use labres_model::{RangeScope, ReferenceRange, Sex, TestCategory};
use labres_standards::{load_catalog, load_ranges};
use std::path::PathBuf;

fn standards_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

#[test]
fn default_catalog_loads() {
    let catalog = load_catalog(&standards_dir().join("catalog.json")).unwrap();
    assert!(catalog.len() >= 20, "catalog has {} tests", catalog.len());

    let hemoglobin = catalog.get("bc.hemoglobin").expect("hemoglobin in catalog");
    assert_eq!(hemoglobin.canonical_name, "Hemoglobin");
    assert_eq!(hemoglobin.category(), TestCategory::BloodCount);
    assert!(hemoglobin.aliases.contains("Гемоглобин"));

    let cholesterol = catalog.get("lipid.cholesterol").expect("cholesterol in catalog");
    assert_eq!(cholesterol.category(), TestCategory::Lipid);
}

#[test]
fn default_ranges_load_with_all_scopes() {
    let table = load_ranges(&standards_dir().join("reference_ranges.csv")).unwrap();
    assert!(table.len() >= 30, "range table has {} entries", table.len());

    let glucose: Vec<&ReferenceRange> = table.for_test("chem.glucose").collect();
    assert_eq!(glucose[0].scope(), RangeScope::Overall);
    assert_eq!(glucose[0].low, 3.9);
    assert_eq!(glucose[0].high, 5.9);

    let combined = table
        .iter()
        .find(|r| r.scope() == RangeScope::SexAge)
        .expect("a sex_age-scoped entry exists");
    assert_eq!(combined.sex, Some(Sex::Male));

    let provisional = table.iter().filter(|r| !r.is_official).count();
    assert!(provisional >= 1, "provisional entries load like any other");
}

#[test]
fn every_range_code_exists_in_catalog() {
    let catalog = load_catalog(&standards_dir().join("catalog.json")).unwrap();
    let table = load_ranges(&standards_dir().join("reference_ranges.csv")).unwrap();
    for range in table.iter() {
        assert!(
            catalog.contains(&range.test_code),
            "range for unknown test {}",
            range.test_code
        );
    }
}
