//! Similarity scoring: pluggable, trait-based text similarity.
//!
//! Default: `LexicalSimilarity` (term-frequency cosine, deterministic, no
//! model). An embedding-backed scorer implements the same trait and is
//! swapped in at startup; `AppState` carries an `Arc<dyn SimilarityScorer>`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::AppError;
use crate::text::SectionMap;

/// Sections compared pairwise between resume and job description.
pub const TRACKED_SECTIONS: [&str; 4] = ["skills", "education", "project experience", "experience"];

#[async_trait]
pub trait SimilarityScorer: Send + Sync {
    /// Similarity in [0, 1] for non-negative backends.
    async fn similarity(&self, left: &str, right: &str) -> Result<f64, AppError>;

    /// Backend label, reported alongside scores.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalSimilarity
// ────────────────────────────────────────────────────────────────────────────

pub struct LexicalSimilarity;

#[async_trait]
impl SimilarityScorer for LexicalSimilarity {
    async fn similarity(&self, left: &str, right: &str) -> Result<f64, AppError> {
        Ok(cosine_similarity(&term_frequencies(left), &term_frequencies(right)))
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }
}

/// Lower-cased terms of letters, digits and `+`/`#` (so "c++" and "c#" survive).
fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut counts = HashMap::new();
    for term in text
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
    {
        *counts.entry(term.to_lowercase()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine of two sparse vectors; 0.0 when either is empty.
pub fn cosine_similarity(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(term, va)| b.get(term).map(|vb| va * vb))
        .sum();
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Section-wise comparison
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionScore {
    pub section: String,
    pub score: f64,
    /// True when at least one side fell back to the whole document.
    pub used_fallback: bool,
}

/// Compares each tracked section. A section that is missing or blank on one
/// side is replaced by that side's whole cleaned text.
pub async fn section_similarity(
    scorer: &dyn SimilarityScorer,
    resume_clean: &str,
    resume_sections: &SectionMap,
    jd_clean: &str,
    jd_sections: &SectionMap,
) -> Result<Vec<SectionScore>, AppError> {
    let mut scores = Vec::with_capacity(TRACKED_SECTIONS.len());

    for section in TRACKED_SECTIONS {
        let (resume_text, resume_fallback) = section_or_whole(resume_sections, section, resume_clean);
        let (jd_text, jd_fallback) = section_or_whole(jd_sections, section, jd_clean);

        let score = if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
            0.0
        } else {
            scorer.similarity(resume_text, jd_text).await?
        };

        scores.push(SectionScore {
            section: section.to_string(),
            score,
            used_fallback: resume_fallback || jd_fallback,
        });
    }

    Ok(scores)
}

fn section_or_whole<'a>(sections: &'a SectionMap, name: &str, whole: &'a str) -> (&'a str, bool) {
    match sections.get(name) {
        Some(content) if !content.trim().is_empty() => (content, false),
        _ => (whole, true),
    }
}
