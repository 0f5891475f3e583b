//! ATS Compatibility Scorer: estimates how well a cleaned resume survives
//! automated text extraction and keyword screening.
//!
//! Composite = keyword × 0.6 + (sections_found / 7) × 0.3 − issues × 0.1,
//! clamped to [0, 1]. Independent of semantic quality.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::ats::checklist::{AtsChecklist, CompositeWeights};

/// Result of scoring one (resume, job description) pair. Never mutated after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct AtsReport {
    /// matched ÷ JD skills; 0.0 when the JD has no skills.
    pub keyword_coverage: f64,
    pub sections_found: Vec<String>,
    pub sections_missing: Vec<String>,
    pub format_issues: Vec<String>,
    /// Always within [0, 1].
    pub composite_score: f64,
    pub summary: String,
}

pub struct AtsScorer {
    checklist: AtsChecklist,
}

impl AtsScorer {
    pub fn new(checklist: AtsChecklist) -> Self {
        Self { checklist }
    }

    /// Splits the checklist into (found, missing), both in checklist order.
    ///
    /// A token counts as found if it appears anywhere in the lower-cased text,
    /// so "I love education" covers "education" without any header.
    pub fn section_coverage(&self, text: &str) -> (Vec<String>, Vec<String>) {
        let lower = text.to_lowercase();
        let (found, missing): (Vec<&str>, Vec<&str>) = self
            .checklist
            .sections
            .iter()
            .copied()
            .partition(|section| lower.contains(*section));

        (
            found.into_iter().map(String::from).collect(),
            missing.into_iter().map(String::from).collect(),
        )
    }

    /// Pattern issues first (checklist order), then one issue per bullet glyph
    /// present. Each checklist item contributes at most once.
    pub fn formatting_issues(&self, text: &str) -> Vec<String> {
        let patterns = self
            .checklist
            .risks
            .iter()
            .filter(|risk| risk.pattern.is_match(text))
            .map(|risk| risk.code.to_string());

        let bullets = self
            .checklist
            .bullet_symbols
            .iter()
            .filter(|symbol| text.contains(**symbol))
            .map(|symbol| format!("Bullet symbol: {symbol:?}"));

        patterns.chain(bullets).collect()
    }

    pub fn composite_report(
        &self,
        cleaned_text: &str,
        matched_skills: &BTreeSet<String>,
        jd_skills: &BTreeSet<String>,
    ) -> AtsReport {
        let keyword_coverage = keyword_score(matched_skills, jd_skills);
        let (sections_found, sections_missing) = self.section_coverage(cleaned_text);
        let format_issues = self.formatting_issues(cleaned_text);

        let composite_score = compute_composite(
            keyword_coverage,
            sections_found.len(),
            self.checklist.sections.len(),
            format_issues.len(),
            &self.checklist.weights,
        );

        let summary = build_summary(
            keyword_coverage,
            &sections_found,
            &sections_missing,
            &format_issues,
            composite_score,
        );

        AtsReport {
            keyword_coverage,
            sections_found,
            sections_missing,
            format_issues,
            composite_score,
            summary,
        }
    }
}

/// Matched-skill count over JD-skill count. An empty JD skill set earns no
/// keyword credit. Only matched skills that are also JD skills count, so the
/// ratio stays within [0, 1].
pub fn keyword_score(matched_skills: &BTreeSet<String>, jd_skills: &BTreeSet<String>) -> f64 {
    if jd_skills.is_empty() {
        return 0.0;
    }
    matched_skills.intersection(jd_skills).count() as f64 / jd_skills.len() as f64
}

pub fn compute_composite(
    keyword: f64,
    sections_found: usize,
    sections_total: usize,
    issue_count: usize,
    weights: &CompositeWeights,
) -> f64 {
    let section_ratio = if sections_total == 0 {
        0.0
    } else {
        sections_found as f64 / sections_total as f64
    };

    let raw = weights.keyword * keyword + weights.sections * section_ratio
        - weights.issue_penalty * issue_count as f64;

    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 1.0)
}

fn build_summary(
    keyword: f64,
    found: &[String],
    missing: &[String],
    issues: &[String],
    composite: f64,
) -> String {
    format!(
        "ATS Optimization:\n\
         ------------------------------\n\
         ATS Skill Coverage: {:.1}%\n\
         Sections Present: {}\n\
         Sections Missing: {}\n\
         Formatting Issues/Warnings: {}\n\
         ATS-Readability Score (0-1): {:.2}\n\
         ------------------------------\n",
        keyword * 100.0,
        list_or_none(found),
        list_or_none(missing),
        list_or_none(issues),
        composite,
    )
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}
