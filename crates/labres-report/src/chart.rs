//! Chart-ready views for the dashboard collaborator.
//!
//! The core renders nothing; it hands over per-patient time series and a
//! latest-result snapshot, each point already carrying its palette color.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use labres_model::{ClassifiedResult, Status};
use serde::{Deserialize, Serialize};

/// One plottable point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDate>,
    pub test_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub status: Status,
    /// Fixed palette color for the status.
    pub color: String,
}

impl ChartPoint {
    fn from_result(result: &ClassifiedResult) -> Self {
        Self {
            timestamp: result.timestamp,
            test_code: result.test_code.clone(),
            value: result.value,
            status: result.status,
            color: result.status.color().to_string(),
        }
    }
}

/// Chart data for one patient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientChart {
    /// Chronologically ordered; undated points sort first (treated as
    /// oldest), ties keep input order.
    pub series: Vec<ChartPoint>,
    /// Latest result per test; a dated result always beats an undated one.
    pub snapshot: BTreeMap<String, ChartPoint>,
}

/// Per-patient chart data, keyed by patient id.
pub fn chart_data(results: &[ClassifiedResult]) -> BTreeMap<String, PatientChart> {
    let mut charts: BTreeMap<String, PatientChart> = BTreeMap::new();

    for result in results {
        let chart = charts.entry(result.patient_id.clone()).or_default();
        chart.series.push(ChartPoint::from_result(result));
    }

    for chart in charts.values_mut() {
        chart.series.sort_by_key(|point| point.timestamp);
        for point in &chart.series {
            // Later entries overwrite earlier ones; after the sort that
            // means the most recent timestamp wins.
            chart
                .snapshot
                .insert(point.test_code.clone(), point.clone());
        }
    }

    charts
}

/// The fixed status palette as a name -> color map, for legend rendering.
pub fn status_palette() -> BTreeMap<String, String> {
    [Status::Low, Status::Normal, Status::High, Status::Unknown]
        .into_iter()
        .map(|status| (status.as_str().to_string(), status.color().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(patient: &str, code: &str, day: u32, value: f64) -> ClassifiedResult {
        ClassifiedResult {
            patient_id: patient.to_string(),
            test_code: code.to_string(),
            value: Some(value),
            timestamp: NaiveDate::from_ymd_opt(2024, 5, day),
            status: Status::Normal,
            is_significant: false,
            range: None,
        }
    }

    #[test]
    fn series_is_chronological_per_patient() {
        let results = vec![
            dated("p1", "chem.glucose", 20, 5.5),
            dated("p1", "chem.glucose", 3, 5.1),
            dated("p2", "chem.glucose", 10, 4.8),
        ];
        let charts = chart_data(&results);
        let p1 = &charts["p1"];
        assert_eq!(p1.series.len(), 2);
        assert_eq!(p1.series[0].timestamp, NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(p1.series[1].timestamp, NaiveDate::from_ymd_opt(2024, 5, 20));
        assert_eq!(charts["p2"].series.len(), 1);
    }

    #[test]
    fn snapshot_takes_most_recent_result() {
        let results = vec![
            dated("p1", "chem.glucose", 20, 6.5),
            dated("p1", "chem.glucose", 3, 5.1),
        ];
        let charts = chart_data(&results);
        let snapshot = &charts["p1"].snapshot["chem.glucose"];
        assert_eq!(snapshot.value, Some(6.5));
    }

    #[test]
    fn undated_results_rank_oldest() {
        let mut undated = dated("p1", "chem.glucose", 1, 9.9);
        undated.timestamp = None;
        let results = vec![dated("p1", "chem.glucose", 3, 5.1), undated];
        let charts = chart_data(&results);
        let p1 = &charts["p1"];
        assert_eq!(p1.series[0].timestamp, None);
        assert_eq!(p1.snapshot["chem.glucose"].value, Some(5.1));
    }

    #[test]
    fn palette_is_the_documented_one() {
        let palette = status_palette();
        assert_eq!(palette["NORMAL"], "#27AE60");
        assert_eq!(palette["LOW"], "#F2C94C");
        assert_eq!(palette["HIGH"], "#EB5757");
        assert_eq!(palette["UNKNOWN"], "#BDBDBD");
    }
}
