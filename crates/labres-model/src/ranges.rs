//! Reference ranges and the table that holds them.
//!
//! Ranges are supplied externally (a read-only input to the pipeline) and
//! are never mutated by the core. The `scope`/`scope_value` schema of the
//! source table is realized as two optional fields; the scope is derived.

use serde::{Deserialize, Serialize};

use crate::enums::{AgeGroup, RangeScope, Sex};

/// A scoped reference range for one canonical test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub test_code: String,
    /// Present for sex-specific and sex+age-specific ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    /// Present for age-group-specific and sex+age-specific ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,
    pub low: f64,
    pub high: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub source: String,
    /// Advisory when false ("provisional"); classification treats both the
    /// same, officiality only breaks resolution ties and informs consumers.
    pub is_official: bool,
}

impl ReferenceRange {
    /// An overall (population-wide) range, the most common case.
    pub fn overall(test_code: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            test_code: test_code.into(),
            sex: None,
            age_group: None,
            low,
            high,
            unit: None,
            source: String::new(),
            is_official: true,
        }
    }

    /// The population slice this range applies to, derived from which
    /// constraint fields are present.
    pub fn scope(&self) -> RangeScope {
        match (self.sex, self.age_group) {
            (Some(_), Some(_)) => RangeScope::SexAge,
            (Some(_), None) => RangeScope::Sex,
            (None, Some(_)) => RangeScope::AgeGroup,
            (None, None) => RangeScope::Overall,
        }
    }
}

/// All reference ranges known to a processing run, in load order.
///
/// Load order matters: it is the final deterministic tie-break during
/// resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeTable {
    entries: Vec<ReferenceRange>,
}

impl RangeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, range: ReferenceRange) {
        self.entries.push(range);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRange> {
        self.entries.iter()
    }

    /// Ranges registered for a test code, in load order.
    pub fn for_test<'a, 'b>(
        &'a self,
        test_code: &'b str,
    ) -> impl Iterator<Item = &'a ReferenceRange> + use<'a, 'b> {
        self.entries.iter().filter(move |r| r.test_code == test_code)
    }
}

impl FromIterator<ReferenceRange> for RangeTable {
    fn from_iter<T: IntoIterator<Item = ReferenceRange>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
