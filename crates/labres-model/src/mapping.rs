//! Outcome types for name clustering and raw-name-to-code mapping.

use serde::{Deserialize, Serialize};

/// A set of raw names judged equivalent by similarity scoring.
///
/// Built once per batch of column names; not persisted beyond the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameCluster {
    /// First-seen member in input order; stable and deterministic.
    pub representative: String,
    /// Insertion-ordered, deduplicated members.
    pub members: Vec<String>,
}

impl NameCluster {
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of matching one raw name against the canonical catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MappingOutcome {
    /// Matched a canonical test at or above the threshold.
    Mapped {
        code: String,
        /// Best similarity score in [0, 1].
        score: f64,
        /// The catalog alias that produced the best score.
        matched_alias: String,
    },
    /// Below threshold against every known alias; surfaced for operator
    /// review, never silently dropped.
    Unmapped,
}

impl MappingOutcome {
    pub fn is_mapped(&self) -> bool {
        matches!(self, MappingOutcome::Mapped { .. })
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            MappingOutcome::Mapped { code, .. } => Some(code),
            MappingOutcome::Unmapped => None,
        }
    }
}
