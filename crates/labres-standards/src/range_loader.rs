//! Reference-range table loading.
//!
//! The table is CSV with columns `test_code, scope, scope_value, low, high,
//! unit, source, is_official`. Scope is one of `overall`, `sex`,
//! `age_group`, `sex_age`; for the combined scope, `scope_value` carries
//! both parts as `<Sex>|<AgeGroup>`. File order is preserved: it is the
//! final resolution tie-break.

use std::collections::BTreeMap;
use std::path::Path;

use labres_model::{AgeGroup, RangeTable, ReferenceRange, Sex};
use tracing::info;

use crate::error::{Result, StandardsError};

/// Load a reference-range table from a CSV file.
pub fn load_ranges(path: &Path) -> Result<RangeTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let mut table = RangeTable::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut row = BTreeMap::new();
        for (pos, value) in record.iter().enumerate() {
            let key = headers.get(pos).unwrap_or("").trim_matches('\u{feff}');
            row.insert(key.to_string(), value.to_string());
        }
        let range = parse_row(&row, path, idx)?;
        table.push(range);
    }
    info!(path = %path.display(), ranges = table.len(), "loaded reference ranges");
    Ok(table)
}

fn parse_row(
    row: &BTreeMap<String, String>,
    path: &Path,
    record: usize,
) -> Result<ReferenceRange> {
    let invalid = |message: String| StandardsError::InvalidRange {
        path: path.to_path_buf(),
        record,
        message,
    };

    let field = |key: &str| row.get(key).map(String::as_str).unwrap_or("");

    let test_code = field("test_code").to_string();
    if test_code.is_empty() {
        return Err(invalid("missing test_code".to_string()));
    }

    let low = field("low")
        .parse::<f64>()
        .map_err(|_| invalid(format!("invalid low bound: {:?}", field("low"))))?;
    let high = field("high")
        .parse::<f64>()
        .map_err(|_| invalid(format!("invalid high bound: {:?}", field("high"))))?;
    if low > high {
        return Err(invalid(format!("low {low} exceeds high {high}")));
    }

    let scope_value = field("scope_value");
    let (sex, age_group) = match field("scope").to_lowercase().as_str() {
        "" | "overall" => (None, None),
        "sex" => {
            let sex = scope_value
                .parse::<Sex>()
                .map_err(|e| invalid(e))?;
            (Some(sex), None)
        }
        "age_group" => {
            let group = scope_value
                .parse::<AgeGroup>()
                .map_err(|e| invalid(e))?;
            (None, Some(group))
        }
        "sex_age" => {
            let (sex_part, age_part) = scope_value
                .split_once('|')
                .ok_or_else(|| invalid(format!("sex_age scope_value needs '|': {scope_value:?}")))?;
            let sex = sex_part.trim().parse::<Sex>().map_err(|e| invalid(e))?;
            let group = age_part.trim().parse::<AgeGroup>().map_err(|e| invalid(e))?;
            (Some(sex), Some(group))
        }
        other => return Err(invalid(format!("unknown scope: {other:?}"))),
    };

    let unit = {
        let u = field("unit");
        (!u.is_empty()).then(|| u.to_string())
    };
    let is_official = matches!(
        field("is_official").to_lowercase().as_str(),
        "true" | "yes" | "1"
    );

    Ok(ReferenceRange {
        test_code,
        sex,
        age_group,
        low,
        high,
        unit,
        source: field("source").to_string(),
        is_official,
    })
}
