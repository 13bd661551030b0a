//! Wide-CSV ingestion: one row per patient visit, test columns by name.

use std::io::Read;
use std::path::Path;

use labres_model::RawRecord;
use tracing::{debug, warn};

use crate::columns::{
    is_age_column, is_date_column, is_patient_column, is_sex_column, parse_age, parse_date,
};
use crate::error::{IngestError, Result};

#[derive(Debug, Default)]
struct ColumnLayout {
    patient: Option<usize>,
    date: Option<usize>,
    sex: Option<usize>,
    age: Option<usize>,
    /// (column index, header) of every test column.
    tests: Vec<(usize, String)>,
}

fn detect_layout(headers: &csv::StringRecord) -> ColumnLayout {
    let mut layout = ColumnLayout::default();
    for (idx, raw) in headers.iter().enumerate() {
        let header = raw.trim().trim_matches('\u{feff}');
        if layout.patient.is_none() && is_patient_column(header) {
            layout.patient = Some(idx);
        } else if layout.date.is_none() && is_date_column(header) {
            layout.date = Some(idx);
        } else if layout.sex.is_none() && is_sex_column(header) {
            layout.sex = Some(idx);
        } else if layout.age.is_none() && is_age_column(header) {
            layout.age = Some(idx);
        } else if !header.is_empty() {
            layout.tests.push((idx, header.to_string()));
        }
    }
    layout
}

/// Read raw records from a wide CSV table.
///
/// Rows without a patient column get a synthesized `Patient_<n>` id, the
/// same fallback the upstream table viewers use. Cell values are kept as
/// raw strings; nothing numeric is interpreted here.
pub fn read_csv_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| IngestError::Csv {
            message: e.to_string(),
        })?
        .clone();
    let layout = detect_layout(&headers);
    if layout.patient.is_none() {
        warn!("no patient column detected; synthesizing row-based ids");
    }

    let mut records = Vec::new();
    for (row_idx, row) in csv_reader.records().enumerate() {
        let row = row.map_err(|e| IngestError::Csv {
            message: e.to_string(),
        })?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("").trim();

        let patient_id = {
            let value = cell(layout.patient);
            if value.is_empty() && layout.patient.is_none() {
                format!("Patient_{}", row_idx + 1)
            } else {
                value.to_string()
            }
        };

        let mut record = RawRecord::new(patient_id);
        record.timestamp = parse_date(cell(layout.date));
        record.sex = cell(layout.sex).parse().ok();
        record.age = parse_age(cell(layout.age));
        for (idx, header) in &layout.tests {
            let value = row.get(*idx).unwrap_or("").trim();
            record.values.insert(header.clone(), value.to_string());
        }
        records.push(record);
    }

    debug!(
        rows = records.len(),
        test_columns = layout.tests.len(),
        "csv table ingested"
    );
    Ok(records)
}

/// Read raw records from a CSV file on disk.
pub fn read_csv_file(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_records(file)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use labres_model::Sex;

    use super::*;

    #[test]
    fn wide_table_with_russian_identity_columns() {
        let csv = "\
Пациент,Дата,Пол,Возраст,Гемоглобин,Глюкоза
P-001,2024-03-15,М,34,135,5.2
P-002,15.03.2024,ж,71,118,\"6,1\"
";
        let records = read_csv_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.patient_id, "P-001");
        assert_eq!(first.timestamp, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(first.sex, Some(Sex::Male));
        assert_eq!(first.age, Some(34));
        assert_eq!(first.values["Гемоглобин"], "135");

        let second = &records[1];
        assert_eq!(second.sex, Some(Sex::Female));
        assert_eq!(second.timestamp, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(second.values["Глюкоза"], "6,1");
    }

    #[test]
    fn missing_patient_column_synthesizes_ids() {
        let csv = "Hemoglobin,Glucose\n135,5.2\n120,4.8\n";
        let records = read_csv_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].patient_id, "Patient_1");
        assert_eq!(records[1].patient_id, "Patient_2");
        assert_eq!(records[0].values.len(), 2);
    }

    #[test]
    fn short_rows_yield_empty_cells() {
        let csv = "patient_id,Hemoglobin,Glucose\nP-1,135\n";
        let records = read_csv_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].values["Hemoglobin"], "135");
        assert_eq!(records[0].values["Glucose"], "");
    }
}
