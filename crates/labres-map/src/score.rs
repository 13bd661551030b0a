//! Pairwise similarity scoring over normalized names.
//!
//! The metric is the maximum of Jaro-Winkler similarity and Indel
//! (length-normalized longest-common-subsequence) similarity, both from
//! `rapidfuzz`. It is symmetric, lies in [0, 1], and scores identical
//! inputs as exactly 1.

use rapidfuzz::distance::{indel, jaro_winkler};

use crate::normalize::normalize;

/// Similarity between two raw names, computed on their normalized forms.
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_normalized(&normalize(a), &normalize(b))
}

/// Similarity between two already-normalized names.
///
/// Callers that score many pairs normalize once and use this directly.
pub fn similarity_normalized(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let jw = jaro_winkler::similarity(a.chars(), b.chars());
    let lcs = indel::normalized_similarity(a.chars(), b.chars());
    jw.max(lcs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_names_score_one() {
        assert_eq!(similarity("Glucose", "glucose "), 1.0);
        assert_eq!(similarity_normalized("glucose", "glucose"), 1.0);
    }

    #[test]
    fn symmetric() {
        let ab = similarity("Hemoglobin", "Haemoglobin");
        let ba = similarity("Haemoglobin", "Hemoglobin");
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn close_spellings_score_high() {
        assert!(similarity("Hemoglobin", "Haemoglobin") > 0.9);
        assert!(similarity("cholesterol", "Cholesterol total") > 0.7);
    }

    #[test]
    fn unrelated_names_score_low() {
        assert!(similarity("Glucose", "Platelets") < 0.6);
    }

    #[test]
    fn bounded_to_unit_interval() {
        for (a, b) in [("", ""), ("a", ""), ("abc", "xyz"), ("abc", "abc")] {
            let score = similarity_normalized(a, b);
            assert!((0.0..=1.0).contains(&score), "{a:?} vs {b:?} -> {score}");
        }
    }
}
