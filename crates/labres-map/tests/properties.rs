//! Property tests for the normalizer and clusterer contracts.

use std::collections::BTreeSet;

use labres_map::{cluster_names, normalize, similarity};
use proptest::prelude::{ProptestConfig, proptest};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn normalize_is_idempotent(input in "\\PC*") {
        let once = normalize(&input);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_emits_only_snake_case_ascii(input in "\\PC*") {
        let normalized = normalize(&input);
        assert!(
            normalized
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        );
        assert!(!normalized.starts_with('_'));
        assert!(!normalized.ends_with('_'));
        assert!(!normalized.contains("__"));
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in "\\PC{0,24}", b in "\\PC{0,24}") {
        let ab = similarity(&a, &b);
        let ba = similarity(&b, &a);
        assert!((ab - ba).abs() < 1e-12, "asymmetric: {ab} vs {ba}");
        assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn clustering_partitions_the_input(
        names in proptest::collection::vec("[a-zA-Zа-яА-Я0-9 _%./-]{0,16}", 0..24),
        threshold in 0.0f64..=1.0,
    ) {
        let clusters = cluster_names(&names, threshold);

        let distinct: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let mut covered: BTreeSet<&str> = BTreeSet::new();
        let mut total_members = 0usize;
        for cluster in &clusters {
            assert!(cluster.contains(&cluster.representative));
            for member in &cluster.members {
                assert!(covered.insert(member.as_str()), "{member:?} in two clusters");
                total_members += 1;
            }
        }
        assert_eq!(covered, distinct);
        assert_eq!(total_members, distinct.len());
    }

    #[test]
    fn raising_the_threshold_only_splits_clusters(
        names in proptest::collection::vec("[a-zA-Zа-яА-Я0-9 ]{1,12}", 1..16),
        low in 0.0f64..=1.0,
        high in 0.0f64..=1.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let coarse = cluster_names(&names, low);
        let fine = cluster_names(&names, high);

        // Every fine cluster must sit inside exactly one coarse cluster.
        for fine_cluster in &fine {
            let hosts = coarse
                .iter()
                .filter(|coarse_cluster| {
                    fine_cluster
                        .members
                        .iter()
                        .all(|member| coarse_cluster.contains(member))
                })
                .count();
            assert_eq!(hosts, 1, "cluster {fine_cluster:?} split across coarse clusters");
        }
    }
}
