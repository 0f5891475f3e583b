//! Skill extraction and skill-set algebra.
//!
//! Dictionary matching only: a skill is present when its lower-cased form
//! occurs anywhere in the lower-cased text. Loose on purpose ("java" also
//! hits "javascript"), matching how the screening heuristics count keywords.

use std::collections::BTreeSet;

use serde::Serialize;

/// Built-in AI/ML/tech skill dictionary.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "keras",
    "sql",
    "nosql",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "linux",
    "pandas",
    "numpy",
    "opencv",
    "huggingface",
    "transformers",
    "langchain",
    "groq",
    "mlops",
    "deep learning",
    "machine learning",
    "data preprocessing",
    "cloud",
    "nlp",
    "llm",
    "git",
    "ci/cd",
    "html",
    "css",
    "javascript",
    "power bi",
    "excel",
    "rest api",
    "flask",
    "django",
];

pub struct SkillExtractor {
    skills: Vec<String>,
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillExtractor {
    /// Entries are trimmed and lower-cased; blanks and duplicates dropped.
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();
        Self { skills }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| lower.contains(skill.as_str()))
            .cloned()
            .collect()
    }
}

/// Set algebra between a resume's skills and a job description's skills.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillGap {
    pub resume_skills: BTreeSet<String>,
    pub jd_skills: BTreeSet<String>,
    /// resume ∩ jd
    pub matched: BTreeSet<String>,
    /// jd − resume
    pub missing: BTreeSet<String>,
    /// resume − jd
    pub extra: BTreeSet<String>,
}

/// Matched / missing / extra counts, the bar-chart view of a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillCounts {
    pub matched: usize,
    pub missing: usize,
    pub extra: usize,
}

impl SkillGap {
    pub fn between(resume_skills: BTreeSet<String>, jd_skills: BTreeSet<String>) -> Self {
        let matched = resume_skills.intersection(&jd_skills).cloned().collect();
        let missing = jd_skills.difference(&resume_skills).cloned().collect();
        let extra = resume_skills.difference(&jd_skills).cloned().collect();
        Self {
            resume_skills,
            jd_skills,
            matched,
            missing,
            extra,
        }
    }

    pub fn counts(&self) -> SkillCounts {
        SkillCounts {
            matched: self.matched.len(),
            missing: self.missing.len(),
            extra: self.extra.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_dictionary_size() {
        assert_eq!(SkillExtractor::default().len(), 39);
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let found = SkillExtractor::default().extract("Built PyTorch models on AWS with Docker");
        assert_eq!(found, set(&["aws", "docker", "pytorch"]));
    }

    #[test]
    fn test_extract_multi_word_skills() {
        let found = SkillExtractor::default().extract("Deep Learning and Machine Learning via REST API");
        assert!(found.contains("deep learning"));
        assert!(found.contains("machine learning"));
        assert!(found.contains("rest api"));
    }

    #[test]
    fn test_extract_substring_match_is_loose() {
        let found = SkillExtractor::default().extract("JavaScript");
        assert!(found.contains("javascript"));
        assert!(found.contains("java"));
    }

    #[test]
    fn test_extract_empty_text() {
        assert!(SkillExtractor::default().extract("").is_empty());
    }

    #[test]
    fn test_custom_dictionary_is_normalised() {
        let extractor = SkillExtractor::new([" Rust ", "rust", "", "Tokio"]);
        assert_eq!(extractor.len(), 2);
        assert_eq!(extractor.extract("async RUST with tokio"), set(&["rust", "tokio"]));
    }

    #[test]
    fn test_skill_gap_set_algebra() {
        let gap = SkillGap::between(set(&["python", "docker", "git"]), set(&["python", "sql"]));
        assert_eq!(gap.matched, set(&["python"]));
        assert_eq!(gap.missing, set(&["sql"]));
        assert_eq!(gap.extra, set(&["docker", "git"]));
        assert_eq!(
            gap.counts(),
            SkillCounts {
                matched: 1,
                missing: 1,
                extra: 2
            }
        );
    }

    #[test]
    fn test_skill_gap_empty_jd() {
        let gap = SkillGap::between(set(&["python"]), BTreeSet::new());
        assert!(gap.matched.is_empty());
        assert!(gap.missing.is_empty());
        assert_eq!(gap.extra, set(&["python"]));
    }
}
