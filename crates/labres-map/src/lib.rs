//! Test-name canonicalization: normalization, similarity clustering, and
//! mapping of raw column names onto the canonical test catalog.
//!
//! This is string-similarity matching, not ontology resolution: it resolves
//! spelling, casing, punctuation, and script variation, and it has the
//! documented failure modes of any fuzzy matcher (distinct tests with very
//! similar names can collide below a strict threshold).

pub mod cluster;
pub mod engine;
pub mod normalize;
pub mod score;
pub mod translit;

pub use cluster::cluster_names;
pub use engine::{
    Match, MappingEngine, apply_mapping, create_mapping, extend_mapping_with_clusters,
    unmapped_names,
};
pub use normalize::normalize;
pub use score::{similarity, similarity_normalized};
pub use translit::transliterate;
