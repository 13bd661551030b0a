//! File-based ingestion round trips.

use std::io::Write;

use labres_ingest::{IngestError, read_records};

#[test]
fn csv_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "patient_id,date,Hemoglobin,Glucose\nP-1,2024-03-15,135,5.2\nP-2,2024-03-16,120,4.8\n"
    )
    .unwrap();

    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].patient_id, "P-1");
    assert_eq!(records[0].values["Hemoglobin"], "135");
}

#[test]
fn json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{"patients": [{{"patient_id": "P-1", "analyses": {{"chem.glucose": {{"value": 5.1}}}}}}]}}"#
    )
    .unwrap();

    let records = read_records(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].values["chem.glucose"], "5.1");
}

#[test]
fn unsupported_extension_is_rejected() {
    let err = read_records(std::path::Path::new("upload.xlsx")).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat(ext) if ext == "xlsx"));
}
