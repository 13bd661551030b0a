pub mod catalog;
pub mod enums;
pub mod error;
pub mod mapping;
pub mod options;
pub mod ranges;
pub mod record;
pub mod report;

pub use catalog::{CanonicalTest, TestCatalog};
pub use enums::{AgeGroup, RangeScope, Sex, Status, TestCategory};
pub use error::{LabError, Result};
pub use mapping::{MappingOutcome, NameCluster};
pub use options::{
    CleanOptions, ClassifyOptions, DEFAULT_SIGNIFICANCE_MARGIN, DEFAULT_SIMILARITY_THRESHOLD,
    MapOptions,
};
pub use ranges::{RangeTable, ReferenceRange};
pub use record::{ClassifiedResult, CleanedRecord, RawRecord, parse_value};
pub use report::CleaningReport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_result_serializes() {
        let result = ClassifiedResult {
            patient_id: "P-001".to_string(),
            test_code: "chem.glucose".to_string(),
            value: Some(5.1),
            timestamp: None,
            status: Status::Normal,
            is_significant: false,
            range: Some(ReferenceRange::overall("chem.glucose", 3.9, 5.9)),
        };
        let json = serde_json::to_string(&result).expect("serialize result");
        assert!(json.contains("\"NORMAL\""));
        let round: ClassifiedResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round, result);
    }

    #[test]
    fn default_options_match_documented_constants() {
        assert!((ClassifyOptions::default().margin - DEFAULT_SIGNIFICANCE_MARGIN).abs() < 1e-12);
        assert!((MapOptions::default().threshold - DEFAULT_SIMILARITY_THRESHOLD).abs() < 1e-12);
        let clean = CleanOptions::default();
        assert!(clean.remove_empty && clean.remove_duplicates && clean.remove_outliers);
    }
}
