//! Category grouping and count roll-ups.

use std::collections::BTreeMap;

use labres_model::{ClassifiedResult, TestCategory};

/// Partition results by test category (derived from the code prefix).
///
/// Input order is preserved within each category; categories themselves
/// come out in enum order.
pub fn group_by_category(
    results: &[ClassifiedResult],
) -> BTreeMap<TestCategory, Vec<ClassifiedResult>> {
    let mut groups: BTreeMap<TestCategory, Vec<ClassifiedResult>> = BTreeMap::new();
    for result in results {
        groups
            .entry(TestCategory::from_code(&result.test_code))
            .or_default()
            .push(result.clone());
    }
    groups
}

/// Result counts per status, keyed by the status display name.
pub fn status_counts(results: &[ClassifiedResult]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        *counts.entry(result.status.as_str().to_string()).or_default() += 1;
    }
    counts
}

/// Result counts per category, keyed by the category display name.
pub fn category_counts(results: &[ClassifiedResult]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for result in results {
        let category = TestCategory::from_code(&result.test_code);
        *counts.entry(category.as_str().to_string()).or_default() += 1;
    }
    counts
}
