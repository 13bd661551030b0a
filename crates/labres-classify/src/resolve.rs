//! Scoped reference-range resolution.
//!
//! Resolution is deterministic and total: it either yields the single best
//! applicable range or nothing, never an error. The caller classifies a
//! missing resolution as UNKNOWN.

use labres_model::{AgeGroup, RangeTable, ReferenceRange, Sex};

/// Resolve the reference range for a test and patient context.
///
/// Priority, highest first: sex- and age-specific (both constraints present
/// and matching) > sex-specific > age-group-specific > overall. A range with
/// a constraint the query cannot satisfy (e.g. a sex-specific range when the
/// record has no sex) is not applicable. Among equal-priority candidates,
/// official entries win, then table load order.
pub fn resolve_range<'a>(
    test_code: &str,
    sex: Option<Sex>,
    age_group: Option<AgeGroup>,
    table: &'a RangeTable,
) -> Option<&'a ReferenceRange> {
    let mut best: Option<(&ReferenceRange, (u8, bool))> = None;
    for range in table.for_test(test_code) {
        if !applies(range, sex, age_group) {
            continue;
        }
        let rank = (range.scope().priority(), range.is_official);
        let better = match &best {
            None => true,
            // Strict comparison keeps the earliest-loaded entry on ties.
            Some((_, current)) => rank > *current,
        };
        if better {
            best = Some((range, rank));
        }
    }
    best.map(|(range, _)| range)
}

fn applies(range: &ReferenceRange, sex: Option<Sex>, age_group: Option<AgeGroup>) -> bool {
    let sex_ok = match range.sex {
        Some(required) => sex == Some(required),
        None => true,
    };
    let age_ok = match range.age_group {
        Some(required) => age_group == Some(required),
        None => true,
    };
    sex_ok && age_ok
}
