// Resume ↔ job description matching: skill extraction, similarity, the
// per-pair analysis pipeline, batch driving and finalist ranking.
// Similarity is pluggable via `SimilarityScorer`; everything else is pure.

pub mod analyzer;
pub mod handlers;
pub mod ranking;
pub mod similarity;
pub mod skills;
pub mod store;

pub use analyzer::Analyzer;
