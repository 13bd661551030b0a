//! Matching raw column names against the canonical test catalog.

use std::collections::BTreeMap;

use labres_model::{MapOptions, MappingOutcome, NameCluster, RawRecord, TestCatalog};
use tracing::{debug, trace};

use crate::normalize::normalize;
use crate::score::{similarity, similarity_normalized};

/// Scores raw names against every known alias of a catalog.
///
/// Aliases are normalized once at construction; a raw name is assigned to
/// the code with the highest-scoring alias, ties broken by the
/// lexicographically lowest code, so a rerun over identical input yields an
/// identical mapping.
#[derive(Debug, Clone)]
pub struct MappingEngine {
    /// (normalized alias, original alias, test code)
    aliases: Vec<(String, String, String)>,
}

impl MappingEngine {
    pub fn new(catalog: &TestCatalog) -> Self {
        let aliases = catalog
            .alias_entries()
            .map(|(alias, code)| (normalize(alias), alias.to_string(), code.to_string()))
            .collect();
        Self { aliases }
    }

    /// Best catalog match for one raw name, regardless of threshold.
    ///
    /// Returns `None` only when the catalog has no aliases at all.
    pub fn best_match(&self, raw_name: &str) -> Option<Match> {
        let normalized = normalize(raw_name);
        let mut best: Option<Match> = None;
        for (alias_normalized, alias, code) in &self.aliases {
            let score = similarity_normalized(&normalized, alias_normalized);
            let better = match &best {
                None => true,
                Some(current) => {
                    score > current.score || (score == current.score && *code < current.code)
                }
            };
            if better {
                best = Some(Match {
                    code: code.clone(),
                    matched_alias: alias.clone(),
                    score,
                });
            }
        }
        best
    }

    /// Map every raw name to a [`MappingOutcome`].
    ///
    /// Names scoring below the threshold against every alias come back
    /// `Unmapped` — surfaced for operator review, not dropped.
    pub fn map_names(
        &self,
        raw_names: &[String],
        options: &MapOptions,
    ) -> BTreeMap<String, MappingOutcome> {
        let mut mapping = BTreeMap::new();
        for raw_name in raw_names {
            let outcome = match self.best_match(raw_name) {
                Some(found) if found.score >= options.threshold => {
                    trace!(
                        raw = %raw_name,
                        code = %found.code,
                        score = found.score,
                        "mapped column"
                    );
                    MappingOutcome::Mapped {
                        code: found.code,
                        score: found.score,
                        matched_alias: found.matched_alias,
                    }
                }
                _ => {
                    trace!(raw = %raw_name, "no match above threshold");
                    MappingOutcome::Unmapped
                }
            };
            mapping.insert(raw_name.clone(), outcome);
        }
        let mapped = mapping.values().filter(|o| o.is_mapped()).count();
        debug!(
            names = raw_names.len(),
            mapped,
            unmapped = raw_names.len() - mapped,
            "catalog mapping complete"
        );
        mapping
    }
}

/// One scored candidate from [`MappingEngine::best_match`].
#[derive(Debug, Clone)]
pub struct Match {
    pub code: String,
    pub matched_alias: String,
    pub score: f64,
}

/// Relabel record columns according to a mapping.
///
/// Produces new records (the input is never mutated): mapped columns are
/// keyed by their canonical code, unmapped columns keep their raw name so
/// their values survive into the cleaned table. When two raw columns of one
/// record map to the same code, the first non-empty value wins.
pub fn apply_mapping(
    records: &[RawRecord],
    mapping: &BTreeMap<String, MappingOutcome>,
) -> Vec<RawRecord> {
    records
        .iter()
        .map(|record| {
            let mut relabeled = RawRecord::new(record.patient_id.clone());
            relabeled.sex = record.sex;
            relabeled.age = record.age;
            relabeled.timestamp = record.timestamp;
            for (raw_name, value) in &record.values {
                let target = mapping
                    .get(raw_name)
                    .and_then(MappingOutcome::code)
                    .unwrap_or(raw_name.as_str());
                let slot = relabeled
                    .values
                    .entry(target.to_string())
                    .or_insert_with(String::new);
                if slot.trim().is_empty() {
                    *slot = value.clone();
                }
            }
            relabeled
        })
        .collect()
}

/// Second-pass rescue: let clusters vouch for their unmapped members.
///
/// When a cluster contains both mapped and unmapped names and every mapped
/// member agrees on one code, the unmapped members inherit it, scored by
/// their similarity to the mapped member that vouched. Clusters whose
/// members disagree are left alone — ambiguity stays visible to the
/// operator rather than being guessed away.
pub fn extend_mapping_with_clusters(
    mapping: &mut BTreeMap<String, MappingOutcome>,
    clusters: &[NameCluster],
) {
    for cluster in clusters {
        let mapped: Vec<(&String, &str)> = cluster
            .members
            .iter()
            .filter_map(|member| {
                mapping
                    .get(member)
                    .and_then(MappingOutcome::code)
                    .map(|code| (member, code))
            })
            .collect();
        let Some((voucher, code)) = mapped.first().copied() else {
            continue;
        };
        if !mapped.iter().all(|(_, c)| *c == code) {
            continue;
        }
        let voucher = voucher.clone();
        let code = code.to_string();
        for member in &cluster.members {
            if mapping.get(member).is_some_and(MappingOutcome::is_mapped) {
                continue;
            }
            let score = similarity(member, &voucher);
            trace!(raw = %member, code = %code, via = %voucher, score, "cluster rescue");
            mapping.insert(
                member.clone(),
                MappingOutcome::Mapped {
                    code: code.clone(),
                    score,
                    matched_alias: voucher.clone(),
                },
            );
        }
    }
}

/// Raw names left unmapped, in input order, for operator review.
pub fn unmapped_names(mapping: &BTreeMap<String, MappingOutcome>) -> Vec<String> {
    mapping
        .iter()
        .filter(|(_, outcome)| !outcome.is_mapped())
        .map(|(name, _)| name.clone())
        .collect()
}

/// Convenience wrapper: build an engine and map a batch in one call.
pub fn create_mapping(
    raw_names: &[String],
    catalog: &TestCatalog,
    options: &MapOptions,
) -> BTreeMap<String, MappingOutcome> {
    MappingEngine::new(catalog).map_names(raw_names, options)
}

#[cfg(test)]
mod tests {
    use labres_model::CanonicalTest;

    use super::*;

    fn catalog() -> TestCatalog {
        let mut glucose = CanonicalTest::new("chem.glucose", "Glucose");
        glucose.add_alias("Глюкоза");
        let cholesterol = CanonicalTest::new("lipid.cholesterol", "Cholesterol");
        [glucose, cholesterol].into_iter().collect()
    }

    #[test]
    fn maps_case_and_whitespace_variants_deterministically() {
        let names: Vec<String> = ["Glucose", "glucose ", "Cholesterol"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let options = MapOptions::new().with_threshold(0.8);
        let first = create_mapping(&names, &catalog(), &options);
        assert_eq!(first["Glucose"].code(), Some("chem.glucose"));
        assert_eq!(first["glucose "].code(), Some("chem.glucose"));
        assert_eq!(first["Cholesterol"].code(), Some("lipid.cholesterol"));

        let second = create_mapping(&names, &catalog(), &options);
        assert_eq!(first, second);
    }

    #[test]
    fn below_threshold_is_unmapped_not_dropped() {
        let names = vec!["Совершенно другое".to_string()];
        let mapping = create_mapping(&names, &catalog(), &MapOptions::default());
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping["Совершенно другое"], MappingOutcome::Unmapped);
    }

    #[test]
    fn cyrillic_alias_matches_cyrillic_column() {
        let names = vec!["глюкоза".to_string()];
        let mapping = create_mapping(&names, &catalog(), &MapOptions::default());
        assert_eq!(mapping["глюкоза"].code(), Some("chem.glucose"));
    }

    #[test]
    fn tie_breaks_on_lowest_code() {
        // Two tests sharing an identical alias: the lexicographically
        // lower code must win, every run.
        let mut a = CanonicalTest::new("chem.zzz", "Shared Name");
        a.add_alias("Shared");
        let mut b = CanonicalTest::new("chem.aaa", "Shared Name");
        b.add_alias("Shared");
        let catalog: TestCatalog = [a, b].into_iter().collect();

        let names = vec!["Shared".to_string()];
        let mapping = create_mapping(&names, &catalog, &MapOptions::default());
        assert_eq!(mapping["Shared"].code(), Some("chem.aaa"));
    }

    #[test]
    fn cluster_rescue_inherits_the_agreed_code() {
        let names = vec!["Glucose".to_string(), "Glucoze level".to_string()];
        let options = MapOptions::new().with_threshold(0.95);
        let mut mapping = create_mapping(&names, &catalog(), &options);
        assert_eq!(mapping["Glucoze level"], MappingOutcome::Unmapped);

        let clusters = vec![NameCluster {
            representative: "Glucose".to_string(),
            members: names.clone(),
        }];
        extend_mapping_with_clusters(&mut mapping, &clusters);
        assert_eq!(mapping["Glucoze level"].code(), Some("chem.glucose"));
    }

    #[test]
    fn cluster_rescue_skips_ambiguous_clusters() {
        let names = vec![
            "Glucose".to_string(),
            "Cholesterol".to_string(),
            "Glucosterol".to_string(),
        ];
        let options = MapOptions::new().with_threshold(0.95);
        let mut mapping = create_mapping(&names, &catalog(), &options);
        assert_eq!(mapping["Glucosterol"], MappingOutcome::Unmapped);

        // One cluster containing two different mapped codes: no rescue.
        let clusters = vec![NameCluster {
            representative: "Glucose".to_string(),
            members: names.clone(),
        }];
        extend_mapping_with_clusters(&mut mapping, &clusters);
        assert_eq!(mapping["Glucosterol"], MappingOutcome::Unmapped);
    }

    #[test]
    fn apply_mapping_relabels_without_mutating_input() {
        let names = vec!["Глюкоза".to_string(), "Mystery Marker".to_string()];
        let mapping = create_mapping(&names, &catalog(), &MapOptions::default());

        let mut record = labres_model::RawRecord::new("p1");
        record.values.insert("Глюкоза".to_string(), "5.4".to_string());
        record
            .values
            .insert("Mystery Marker".to_string(), "1.0".to_string());
        let input = vec![record];

        let relabeled = apply_mapping(&input, &mapping);
        assert_eq!(relabeled[0].values["chem.glucose"], "5.4");
        assert_eq!(relabeled[0].values["Mystery Marker"], "1.0");
        // Input untouched.
        assert!(input[0].values.contains_key("Глюкоза"));

        assert_eq!(unmapped_names(&mapping), vec!["Mystery Marker".to_string()]);
    }

    #[test]
    fn exact_code_in_source_matches_itself() {
        let names = vec!["chem.glucose".to_string()];
        let mapping = create_mapping(&names, &catalog(), &MapOptions::default());
        assert_eq!(mapping["chem.glucose"].code(), Some("chem.glucose"));
    }
}
