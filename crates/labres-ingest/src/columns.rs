//! Identity-column detection for wide tables.
//!
//! Source tables name their identity columns inconsistently and in more
//! than one language; everything not recognized here is a test column.

use chrono::NaiveDate;

/// Normalize a header for matching: trim, strip a BOM, lowercase.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_lowercase()
}

pub fn is_patient_column(header: &str) -> bool {
    matches!(
        normalize_header(header).as_str(),
        "patient_id" | "patient id" | "patientid" | "id" | "subject_id" | "subject id" | "пациент"
    )
}

pub fn is_date_column(header: &str) -> bool {
    matches!(
        normalize_header(header).as_str(),
        "date" | "timestamp" | "visit_date" | "visit date" | "дата"
    )
}

pub fn is_sex_column(header: &str) -> bool {
    matches!(normalize_header(header).as_str(), "sex" | "gender" | "пол")
}

pub fn is_age_column(header: &str) -> bool {
    matches!(normalize_header(header).as_str(), "age" | "возраст")
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Parse a date cell. Accepts ISO dates, the formats common in exported
/// tables, and datetime strings (the time part is dropped).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Parse an age cell in whole years. Tolerates fractional notation.
pub fn parse_age(raw: &str) -> Option<u32> {
    let value = labres_model::parse_value(raw)?;
    if (0.0..200.0).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}
