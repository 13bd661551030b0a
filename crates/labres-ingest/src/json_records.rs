//! JSON ingestion: the backend exchange format and plain object arrays.
//!
//! The exchange format carries a `test_names` index and a `patients` array
//! whose entries hold an `analyses` map of per-test objects. The plain
//! format is an array of wide objects, one per row, with identity fields
//! mixed into the same object as test values.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use labres_model::RawRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::columns::{
    is_age_column, is_date_column, is_patient_column, is_sex_column, parse_age, parse_date,
};
use crate::error::{IngestError, Result};

#[derive(Debug, Deserialize)]
struct PatientsDocument {
    #[serde(default)]
    #[allow(dead_code)]
    test_names: BTreeMap<String, String>,
    patients: Vec<PatientEntry>,
}

#[derive(Debug, Deserialize)]
struct PatientEntry {
    #[serde(default)]
    patient_id: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    sex: Option<String>,
    #[serde(default)]
    age: Option<Value>,
    #[serde(default)]
    analyses: BTreeMap<String, AnalysisEntry>,
}

#[derive(Debug, Deserialize)]
struct AnalysisEntry {
    #[serde(default)]
    value: Value,
}

/// Read raw records from JSON.
///
/// Accepts either the `{"test_names": ..., "patients": [...]}` exchange
/// format or a plain array of wide objects.
pub fn read_json_records<R: Read>(mut reader: R) -> Result<Vec<RawRecord>> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|e| IngestError::Json {
            message: e.to_string(),
        })?;
    let value: Value = serde_json::from_str(&raw).map_err(|e| IngestError::Json {
        message: e.to_string(),
    })?;

    let records: Vec<RawRecord> = if value.get("patients").is_some() {
        let document: PatientsDocument =
            serde_json::from_value(value).map_err(|e| IngestError::Json {
                message: e.to_string(),
            })?;
        document
            .patients
            .into_iter()
            .enumerate()
            .map(patient_to_record)
            .collect()
    } else if let Value::Array(rows) = value {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| wide_object_to_record(idx, row))
            .collect()
    } else {
        return Err(IngestError::Json {
            message: "expected a patients document or an array of row objects".to_string(),
        });
    };

    debug!(rows = records.len(), "json table ingested");
    Ok(records)
}

/// Read raw records from a JSON file on disk.
pub fn read_json_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_json_records(file)
}

fn patient_to_record((idx, patient): (usize, PatientEntry)) -> RawRecord {
    let patient_id = if patient.patient_id.trim().is_empty() {
        format!("Patient_{}", idx + 1)
    } else {
        patient.patient_id.trim().to_string()
    };
    let mut record = RawRecord::new(patient_id);
    record.timestamp = parse_date(&patient.date);
    record.sex = patient.sex.as_deref().and_then(|s| s.parse().ok());
    record.age = patient.age.as_ref().and_then(|v| parse_age(&value_to_string(v)));
    for (test, analysis) in patient.analyses {
        record
            .values
            .insert(test, value_to_string(&analysis.value));
    }
    record
}

fn wide_object_to_record(idx: usize, row: &Value) -> RawRecord {
    let Value::Object(fields) = row else {
        return RawRecord::new(format!("Patient_{}", idx + 1));
    };

    let mut record = RawRecord::new(String::new());
    for (key, value) in fields {
        let text = value_to_string(value);
        if is_patient_column(key) && record.patient_id.is_empty() {
            record.patient_id = text;
        } else if is_date_column(key) && record.timestamp.is_none() {
            record.timestamp = parse_date(&text);
        } else if is_sex_column(key) && record.sex.is_none() {
            record.sex = text.parse().ok();
        } else if is_age_column(key) && record.age.is_none() {
            record.age = parse_age(&text);
        } else {
            record.values.insert(key.clone(), text);
        }
    }
    if record.patient_id.trim().is_empty() {
        record.patient_id = format!("Patient_{}", idx + 1);
    }
    record
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use labres_model::Sex;

    use super::*;

    #[test]
    fn exchange_format_round_trips() {
        let json = r#"{
            "test_names": {"chem.glucose": "Glucose"},
            "patients": [
                {
                    "patient_id": "P-001",
                    "date": "2024-03-15",
                    "sex": "F",
                    "age": 42,
                    "analyses": {
                        "chem.glucose": {"value": 5.2, "unit": "mmol/L"},
                        "bc.hemoglobin": {"value": "128"}
                    }
                }
            ]
        }"#;
        let records = read_json_records(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.patient_id, "P-001");
        assert_eq!(record.sex, Some(Sex::Female));
        assert_eq!(record.age, Some(42));
        assert_eq!(record.timestamp, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(record.values["chem.glucose"], "5.2");
        assert_eq!(record.values["bc.hemoglobin"], "128");
    }

    #[test]
    fn wide_array_format_detects_identity_fields() {
        let json = r#"[
            {"patient_id": "P-1", "Дата": "01.02.2024", "Глюкоза": 4.9},
            {"Глюкоза": 5.5}
        ]"#;
        let records = read_json_records(json.as_bytes()).unwrap();
        assert_eq!(records[0].patient_id, "P-1");
        assert_eq!(records[0].timestamp, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(records[0].values["Глюкоза"], "4.9");
        assert_eq!(records[1].patient_id, "Patient_2");
    }

    #[test]
    fn missing_analyses_yield_empty_value_map() {
        let json = r#"{"patients": [{"patient_id": "P-1"}]}"#;
        let records = read_json_records(json.as_bytes()).unwrap();
        assert!(records[0].values.is_empty());
    }

    #[test]
    fn scalar_document_is_a_structural_error() {
        let err = read_json_records("42".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Json { .. }));
    }
}
