//! The abnormal-tests view: everything outside its range, worst first.

use labres_model::ClassifiedResult;

/// Filter to abnormal results (LOW or HIGH; UNKNOWN is not abnormal, it is
/// unassessed) and order them by severity: significant results first, then
/// by absolute deviation from the nearer bound, descending. The sort is
/// stable, so ties keep input order.
pub fn abnormal_results(results: &[ClassifiedResult]) -> Vec<ClassifiedResult> {
    let mut abnormal: Vec<ClassifiedResult> = results
        .iter()
        .filter(|r| r.status.is_abnormal())
        .cloned()
        .collect();
    abnormal.sort_by(|a, b| {
        b.is_significant.cmp(&a.is_significant).then_with(|| {
            let da = a.deviation().unwrap_or(0.0);
            let db = b.deviation().unwrap_or(0.0);
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    abnormal
}

#[cfg(test)]
mod tests {
    use labres_model::{ReferenceRange, Status};

    use super::*;

    fn result(
        patient: &str,
        value: f64,
        status: Status,
        is_significant: bool,
    ) -> ClassifiedResult {
        ClassifiedResult {
            patient_id: patient.to_string(),
            test_code: "bc.hemoglobin".to_string(),
            value: Some(value),
            timestamp: None,
            status,
            is_significant,
            range: Some(ReferenceRange::overall("bc.hemoglobin", 120.0, 160.0)),
        }
    }

    #[test]
    fn significant_first_then_deviation_descending() {
        let results = vec![
            result("mild-high", 165.0, Status::High, false),
            result("severe-low", 40.0, Status::Low, true),
            result("worse-high", 180.0, Status::High, false),
            result("normal", 130.0, Status::Normal, false),
            result("unknown", 0.0, Status::Unknown, false),
        ];
        let ordered = abnormal_results(&results);
        let ids: Vec<&str> = ordered.iter().map(|r| r.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["severe-low", "worse-high", "mild-high"]);
    }

    #[test]
    fn normal_and_unknown_are_excluded() {
        let results = vec![
            result("a", 130.0, Status::Normal, false),
            result("b", 0.0, Status::Unknown, false),
        ];
        assert!(abnormal_results(&results).is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let results = vec![
            result("first", 165.0, Status::High, false),
            result("second", 115.0, Status::Low, false),
        ];
        // Deviations are both 5.0.
        let ordered = abnormal_results(&results);
        assert_eq!(ordered[0].patient_id, "first");
        assert_eq!(ordered[1].patient_id, "second");
    }
}
