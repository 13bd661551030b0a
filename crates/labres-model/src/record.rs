//! Record types flowing through the pipeline.
//!
//! A [`RawRecord`] is the shape produced by the file-format collaborators:
//! one row per patient visit, with a map from raw test name (as found in the
//! source table) to raw value string. Records are immutable once ingested;
//! every stage produces new output instead of mutating its input.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{AgeGroup, Sex, Status};
use crate::ranges::ReferenceRange;

/// One row of an ingested laboratory table, untouched by processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDate>,
    /// Raw test name -> raw value, exactly as found in the source.
    pub values: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            sex: None,
            age: None,
            timestamp: None,
            values: BTreeMap::new(),
        }
    }

    /// Age group derived from the recorded age, when present.
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.map(AgeGroup::from_age)
    }
}

/// A cleaned record: same identity fields, values parsed to numbers.
///
/// `None` means missing — either the source cell was empty/non-numeric or
/// the value was nulled by outlier screening. Keys are canonical test codes
/// for mapped columns and the original raw name for unmapped ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDate>,
    pub values: BTreeMap<String, Option<f64>>,
}

impl CleanedRecord {
    /// Age group derived from the recorded age, when present.
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.map(AgeGroup::from_age)
    }

    /// Count of present (non-missing) values.
    pub fn present_values(&self) -> usize {
        self.values.values().filter(|v| v.is_some()).count()
    }
}

/// One classified (test, value) pair with the range that was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedResult {
    pub patient_id: String,
    pub test_code: String,
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDate>,
    pub status: Status,
    pub is_significant: bool,
    /// The reference range used, absent when status is UNKNOWN.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ReferenceRange>,
}

impl ClassifiedResult {
    /// Absolute deviation from the nearer bound of the applied range.
    ///
    /// Zero for in-range values; `None` when the value or range is missing.
    pub fn deviation(&self) -> Option<f64> {
        let value = self.value?;
        let range = self.range.as_ref()?;
        if value < range.low {
            Some(range.low - value)
        } else if value > range.high {
            Some(value - range.high)
        } else {
            Some(0.0)
        }
    }
}

/// Parse a raw cell into a finite numeric value.
///
/// Decimal commas (common in Russian lab exports) are accepted. Returns
/// `None` for anything non-numeric or non-finite — those cells count as
/// missing, never as errors.
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok().or_else(|| {
        if trimmed.contains(',') && !trimmed.contains('.') {
            trimmed.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    })?;
    parsed.is_finite().then_some(parsed)
}
