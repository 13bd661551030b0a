//! Snapshot of the serialized run summary, the contract with downstream
//! consumers.

use labres_model::{ClassifiedResult, CleaningReport, ReferenceRange, Status};
use labres_report::summarize;

fn result(
    patient: &str,
    code: &str,
    value: f64,
    status: Status,
    range: Option<ReferenceRange>,
) -> ClassifiedResult {
    ClassifiedResult {
        patient_id: patient.to_string(),
        test_code: code.to_string(),
        value: Some(value),
        timestamp: None,
        status,
        is_significant: false,
        range,
    }
}

#[test]
fn summary_shape_is_stable() {
    let cleaning = CleaningReport {
        rows_before: 3,
        rows_after: 2,
        removed_empty: 1,
        removed_duplicates: 0,
        non_numeric_values: 0,
        ..CleaningReport::default()
    };
    let results = vec![
        result("p1", "chem.glucose", 5.1, Status::Normal, None),
        result(
            "p2",
            "bc.hemoglobin",
            180.5,
            Status::High,
            Some(ReferenceRange::overall("bc.hemoglobin", 120.0, 160.0)),
        ),
    ];

    let summary = summarize(&cleaning, &results);

    insta::assert_json_snapshot!(summary, @r#"
    {
      "cleaning": {
        "rows_before": 3,
        "rows_after": 2,
        "removed_empty": 1,
        "removed_duplicates": 0,
        "non_numeric_values": 0
      },
      "total_results": 2,
      "status_counts": {
        "HIGH": 1,
        "NORMAL": 1
      },
      "category_counts": {
        "Blood Count": 1,
        "Chemistry": 1
      },
      "abnormal": [
        {
          "patient_id": "p2",
          "test_code": "bc.hemoglobin",
          "value": 180.5,
          "status": "HIGH",
          "is_significant": false,
          "deviation": 20.5
        }
      ]
    }
    "#);
}
