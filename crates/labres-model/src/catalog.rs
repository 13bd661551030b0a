//! Canonical test identities and the catalog that indexes them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::enums::TestCategory;

/// The single resolved identity of a laboratory measurement, independent of
/// raw naming variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTest {
    /// Stable category-prefixed identifier, e.g. `bc.hemoglobin`.
    pub code: String,
    pub canonical_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Raw names known to map to this test. Shared read-only once built.
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl CanonicalTest {
    pub fn new(code: impl Into<String>, canonical_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            canonical_name: canonical_name.into(),
            unit: None,
            aliases: BTreeSet::new(),
        }
    }

    /// Category derived from the code prefix.
    pub fn category(&self) -> TestCategory {
        TestCategory::from_code(&self.code)
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.insert(alias.into());
    }
}

/// Read-only index of canonical tests for one processing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCatalog {
    tests: BTreeMap<String, CanonicalTest>,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test, replacing any previous entry with the same code.
    pub fn insert(&mut self, test: CanonicalTest) {
        self.tests.insert(test.code.clone(), test);
    }

    pub fn get(&self, code: &str) -> Option<&CanonicalTest> {
        self.tests.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.tests.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Tests in code order (BTreeMap iteration is deterministic).
    pub fn iter(&self) -> impl Iterator<Item = &CanonicalTest> {
        self.tests.values()
    }

    /// Every known (alias, code) pair for name matching.
    ///
    /// The canonical name and the code itself are treated as aliases, so a
    /// source column already carrying the code matches exactly.
    pub fn alias_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tests.values().flat_map(|test| {
            std::iter::once((test.code.as_str(), test.code.as_str()))
                .chain(std::iter::once((
                    test.canonical_name.as_str(),
                    test.code.as_str(),
                )))
                .chain(
                    test.aliases
                        .iter()
                        .map(move |alias| (alias.as_str(), test.code.as_str())),
                )
        })
    }
}

impl FromIterator<CanonicalTest> for TestCatalog {
    fn from_iter<T: IntoIterator<Item = CanonicalTest>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for test in iter {
            catalog.insert(test);
        }
        catalog
    }
}
