//! Type-safe enumerations for laboratory result processing.
//!
//! These enums give compile-time safety to concepts that reference data and
//! source tables represent as free-form strings: test categories, patient
//! sex, age groups, range scopes, and classification statuses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clinical category of a laboratory test.
///
/// Categories are encoded as the prefix of a canonical test code
/// (e.g. `bc.hemoglobin` is a blood-count test).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TestCategory {
    /// Body measurements: height, weight, BMI.
    Anthropometric,
    /// Clinical chemistry: glucose, creatinine, liver enzymes.
    Chemistry,
    /// Complete blood count: hemoglobin, erythrocytes, platelets.
    BloodCount,
    /// Serology: antibodies, infection markers.
    Serology,
    /// Inflammatory markers: CRP, ESR.
    Inflammatory,
    /// Lipid panel: cholesterol, triglycerides.
    Lipid,
    /// Anything without a recognized code prefix.
    Other,
}

impl TestCategory {
    /// Returns the code prefix used for this category (without the dot).
    pub fn code_prefix(&self) -> &'static str {
        match self {
            TestCategory::Anthropometric => "anthro",
            TestCategory::Chemistry => "chem",
            TestCategory::BloodCount => "bc",
            TestCategory::Serology => "sero",
            TestCategory::Inflammatory => "infl",
            TestCategory::Lipid => "lipid",
            TestCategory::Other => "other",
        }
    }

    /// Returns the human-readable category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::Anthropometric => "Anthropometric",
            TestCategory::Chemistry => "Chemistry",
            TestCategory::BloodCount => "Blood Count",
            TestCategory::Serology => "Serology",
            TestCategory::Inflammatory => "Inflammatory",
            TestCategory::Lipid => "Lipid",
            TestCategory::Other => "Other",
        }
    }

    /// Derive the category from a canonical test code.
    ///
    /// The category is the segment before the first `.` of the code;
    /// codes without a recognized prefix fall back to [`TestCategory::Other`].
    pub fn from_code(code: &str) -> Self {
        let prefix = code.split('.').next().unwrap_or("");
        match prefix.to_lowercase().as_str() {
            "anthro" => TestCategory::Anthropometric,
            "chem" => TestCategory::Chemistry,
            "bc" => TestCategory::BloodCount,
            "sero" => TestCategory::Serology,
            "infl" => TestCategory::Inflammatory,
            "lipid" => TestCategory::Lipid,
            _ => TestCategory::Other,
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Patient sex as recorded in source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    /// Parse a sex value as found in source tables.
    /// Accepts English and Russian spellings, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "m" | "male" | "м" | "муж" | "мужской" => Ok(Sex::Male),
            "f" | "female" | "ж" | "жен" | "женский" => Ok(Sex::Female),
            _ => Err(format!("Unknown sex value: {s}")),
        }
    }
}

/// Age group used for age-scoped reference ranges.
///
/// Boundaries are fixed here; the source data never defines them, so the
/// loader, resolver, and tests all share this single definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Under 12 years.
    Child,
    /// 12 to 17 years.
    Adolescent,
    /// 18 to 34 years.
    YoungAdult,
    /// 35 to 49 years.
    Adult,
    /// 50 to 64 years.
    MiddleAged,
    /// 65 years and over.
    Elderly,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Child => "Child",
            AgeGroup::Adolescent => "Adolescent",
            AgeGroup::YoungAdult => "Young Adult",
            AgeGroup::Adult => "Adult",
            AgeGroup::MiddleAged => "Middle Aged",
            AgeGroup::Elderly => "Elderly",
        }
    }

    /// Derive the age group from an age in whole years.
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=11 => AgeGroup::Child,
            12..=17 => AgeGroup::Adolescent,
            18..=34 => AgeGroup::YoungAdult,
            35..=49 => AgeGroup::Adult,
            50..=64 => AgeGroup::MiddleAged,
            _ => AgeGroup::Elderly,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    /// Parse an age-group label. Accepts spaces or underscores between
    /// words, case-insensitive ("Young Adult", "young_adult", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "child" => Ok(AgeGroup::Child),
            "adolescent" => Ok(AgeGroup::Adolescent),
            "young adult" => Ok(AgeGroup::YoungAdult),
            "adult" => Ok(AgeGroup::Adult),
            "middle aged" => Ok(AgeGroup::MiddleAged),
            "elderly" => Ok(AgeGroup::Elderly),
            _ => Err(format!("Unknown age group: {s}")),
        }
    }
}

/// Classification status of one measured value against its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Low,
    Normal,
    High,
    /// No reference range resolved, or the value itself is missing.
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Low => "LOW",
            Status::Normal => "NORMAL",
            Status::High => "HIGH",
            Status::Unknown => "UNKNOWN",
        }
    }

    /// Fixed chart palette consumed by the dashboard collaborator.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Low => "#F2C94C",
            Status::Normal => "#27AE60",
            Status::High => "#EB5757",
            Status::Unknown => "#BDBDBD",
        }
    }

    /// True for results outside the reference range (LOW or HIGH).
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Status::Low | Status::High)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Population slice a reference range applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeScope {
    Overall,
    Sex,
    AgeGroup,
    /// Both sex- and age-group-specific.
    SexAge,
}

impl RangeScope {
    /// Resolution priority: higher wins when several ranges apply.
    pub fn priority(&self) -> u8 {
        match self {
            RangeScope::SexAge => 3,
            RangeScope::Sex => 2,
            RangeScope::AgeGroup => 1,
            RangeScope::Overall => 0,
        }
    }
}
