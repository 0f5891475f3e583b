//! Pair analysis: runs one resume against one job description.
//!
//! Flow: clean → sections → overall similarity → section similarities →
//!       skills + gap → ATS composite → remediation suggestions.
//!
//! Every component is injected at startup; nothing here touches the DB.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ats::{format_suggestions, AtsChecklist, AtsReport, AtsScorer};
use crate::errors::AppError;
use crate::matching::similarity::{
    section_similarity, LexicalSimilarity, SectionScore, SimilarityScorer,
};
use crate::matching::skills::{SkillCounts, SkillExtractor, SkillGap};
use crate::text::{Document, SectionMap, TextNormalizer};

/// A named document as supplied by a caller (file name or label + raw text).
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentInput {
    pub name: String,
    pub text: String,
}

/// Everything a report renderer needs for one (resume, JD) pair.
#[derive(Debug, Clone, Serialize)]
pub struct MatchAnalysis {
    pub resume_name: String,
    pub jd_name: String,
    pub similarity_backend: String,
    pub overall_score: f64,
    pub section_scores: Vec<SectionScore>,
    pub skills: SkillGap,
    pub skill_counts: SkillCounts,
    pub ats: AtsReport,
    pub suggestions: Vec<String>,
    pub resume_sections: SectionMap,
    pub jd_sections: SectionMap,
}

#[derive(Clone)]
pub struct Analyzer {
    pub normalizer: Arc<TextNormalizer>,
    pub ats: Arc<AtsScorer>,
    pub skills: Arc<SkillExtractor>,
    pub similarity: Arc<dyn SimilarityScorer>,
}

impl Analyzer {
    /// Standard reference data with the lexical similarity backend.
    /// `skill_list` replaces the built-in skill dictionary when given.
    pub fn standard(skill_list: Option<&[String]>) -> Result<Self, regex::Error> {
        let skills = match skill_list.map(SkillExtractor::new) {
            Some(custom) if !custom.is_empty() => custom,
            Some(_) => {
                warn!("Custom skill list has no usable entries, using the built-in dictionary");
                SkillExtractor::default()
            }
            None => SkillExtractor::default(),
        };

        Ok(Self {
            normalizer: Arc::new(TextNormalizer::new()?),
            ats: Arc::new(AtsScorer::new(AtsChecklist::standard()?)),
            skills: Arc::new(skills),
            similarity: Arc::new(LexicalSimilarity),
        })
    }

    pub fn similarity_backend(&self) -> &'static str {
        self.similarity.backend()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub async fn analyze(
        &self,
        resume: &DocumentInput,
        jd: &DocumentInput,
    ) -> Result<MatchAnalysis, AppError> {
        let resume_doc = Document::new(resume.text.as_str(), &self.normalizer);
        let jd_doc = Document::new(jd.text.as_str(), &self.normalizer);

        let resume_sections = resume_doc.sections(&self.normalizer);
        let jd_sections = jd_doc.sections(&self.normalizer);
        debug!(
            "{}: {} raw chars, {} sections; {}: {} raw chars, {} sections",
            resume.name,
            resume_doc.raw().len(),
            resume_sections.len(),
            jd.name,
            jd_doc.raw().len(),
            jd_sections.len()
        );

        let overall_score = self
            .similarity
            .similarity(resume_doc.cleaned(), jd_doc.cleaned())
            .await?;

        let section_scores = section_similarity(
            self.similarity.as_ref(),
            resume_doc.cleaned(),
            &resume_sections,
            jd_doc.cleaned(),
            &jd_sections,
        )
        .await?;

        let skills = SkillGap::between(
            self.skills.extract(resume_doc.cleaned()),
            self.skills.extract(jd_doc.cleaned()),
        );

        let ats = self
            .ats
            .composite_report(resume_doc.cleaned(), &skills.matched, &skills.jd_skills);
        let suggestions = format_suggestions(&ats.sections_missing, &ats.format_issues);

        info!(
            "Analysed {} vs {}: overall={:.3} ats={:.2} matched={}/{}",
            resume.name,
            jd.name,
            overall_score,
            ats.composite_score,
            skills.matched.len(),
            skills.jd_skills.len()
        );

        Ok(MatchAnalysis {
            resume_name: resume.name.clone(),
            jd_name: jd.name.clone(),
            similarity_backend: self.similarity.backend().to_string(),
            overall_score,
            section_scores,
            skill_counts: skills.counts(),
            skills,
            ats,
            suggestions,
            resume_sections,
            jd_sections,
        })
    }

    /// Every resume against every job description, resume-major. Fails as a
    /// whole if any pair fails.
    pub async fn analyze_matrix(
        &self,
        resumes: &[DocumentInput],
        jds: &[DocumentInput],
    ) -> Result<Vec<MatchAnalysis>, AppError> {
        let total = resumes.len() * jds.len();
        let mut analyses = Vec::with_capacity(total);
        for resume in resumes {
            for jd in jds {
                info!(
                    "[{}/{}] Resume: {} vs JD: {}",
                    analyses.len() + 1,
                    total,
                    resume.name,
                    jd.name
                );
                analyses.push(self.analyze(resume, jd).await?);
            }
        }
        Ok(analyses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::ats::suggestions::ATS_FRIENDLY_MESSAGE;

    const RESUME: &str = "Jane Doe\nContact: jane@example.com https://jane.dev\n\n\
        About Me\nML engineer.\n\n\
        Education\nBSc Computer Science\n\n\
        Skills\nPython, SQL, Docker, PyTorch\n\n\
        Project Experience\nBuilt a recommendation engine. Work experience at Acme.\n\n\
        Certifications\nAWS Solutions Architect";

    const JD: &str = "Senior ML Engineer\n\
        Skills\nPython, SQL, Kubernetes\n\
        Experience with PyTorch preferred.";

    fn input(name: &str, text: &str) -> DocumentInput {
        DocumentInput {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let analyzer = Analyzer::standard(None).unwrap();
        let analysis = analyzer
            .analyze(&input("jane.txt", RESUME), &input("ml.txt", JD))
            .await
            .unwrap();

        assert_eq!(analysis.resume_name, "jane.txt");
        assert_eq!(analysis.similarity_backend, "lexical");
        assert!(analysis.overall_score > 0.0 && analysis.overall_score <= 1.0);
        assert_eq!(analysis.section_scores.len(), 4);

        assert!(analysis.skills.matched.contains("python"));
        assert!(analysis.skills.matched.contains("pytorch"));
        assert!(analysis.skills.missing.contains("kubernetes"));
        assert!(analysis.skills.extra.contains("docker"));

        // all seven checklist tokens appear in the resume
        assert!(analysis.ats.sections_missing.is_empty());
        assert!(analysis.ats.format_issues.is_empty());
        assert_eq!(analysis.suggestions, vec![ATS_FRIENDLY_MESSAGE.to_string()]);
        assert!(analysis.resume_sections.contains("project experience"));
        assert!(analysis.resume_sections.contains("certifications"));
    }

    #[tokio::test]
    async fn test_ats_composite_uses_matched_over_jd_skills() {
        let analyzer = Analyzer::standard(None).unwrap();
        let analysis = analyzer
            .analyze(&input("r", RESUME), &input("j", JD))
            .await
            .unwrap();

        // jd skills: python, sql, kubernetes, pytorch → 3 matched
        let expected = analysis.skills.matched.len() as f64 / analysis.skills.jd_skills.len() as f64;
        assert!((analysis.ats.keyword_coverage - expected).abs() < f64::EPSILON);
        assert!(analysis.ats.composite_score >= 0.0 && analysis.ats.composite_score <= 1.0);
    }

    #[tokio::test]
    async fn test_empty_documents_degrade_to_zero() {
        let analyzer = Analyzer::standard(None).unwrap();
        let analysis = analyzer
            .analyze(&input("r", ""), &input("j", ""))
            .await
            .unwrap();

        assert_eq!(analysis.overall_score, 0.0);
        assert_eq!(analysis.ats.composite_score, 0.0);
        assert_eq!(analysis.ats.sections_missing.len(), 7);
        assert!(analysis.suggestions[0].starts_with("Add missing sections"));
    }

    #[tokio::test]
    async fn test_custom_skill_list() {
        let list = vec!["Rust".to_string(), "Tokio".to_string()];
        let analyzer = Analyzer::standard(Some(&list)).unwrap();
        let analysis = analyzer
            .analyze(&input("r", "Rust and Python"), &input("j", "Rust, Tokio"))
            .await
            .unwrap();

        assert_eq!(analysis.skills.matched.len(), 1);
        assert!(analysis.skills.missing.contains("tokio"));
        assert!(analysis.skills.resume_skills.iter().all(|s| s != "python"));
    }

    /// Lexical scores until `fail_at` calls have been made, then errors.
    struct FlakySimilarity {
        calls: AtomicUsize,
        fail_at: usize,
    }

    #[async_trait]
    impl SimilarityScorer for FlakySimilarity {
        async fn similarity(&self, left: &str, right: &str) -> Result<f64, AppError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 >= self.fail_at {
                return Err(AppError::UnprocessableEntity("similarity backend failed".into()));
            }
            LexicalSimilarity.similarity(left, right).await
        }

        fn backend(&self) -> &'static str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn test_analyze_matrix_is_resume_major() {
        let analyzer = Analyzer::standard(None).unwrap();
        let resumes = vec![input("r1", RESUME), input("r2", "Skills\nRust")];
        let jds = vec![input("j1", JD), input("j2", "Python developer")];

        let analyses = analyzer.analyze_matrix(&resumes, &jds).await.unwrap();
        let pairs: Vec<(&str, &str)> = analyses
            .iter()
            .map(|a| (a.resume_name.as_str(), a.jd_name.as_str()))
            .collect();
        assert_eq!(pairs, vec![("r1", "j1"), ("r1", "j2"), ("r2", "j1"), ("r2", "j2")]);
    }

    #[tokio::test]
    async fn test_analyze_matrix_fails_whole_batch_on_any_pair() {
        let mut analyzer = Analyzer::standard(None).unwrap();
        // 5 similarity calls per pair (overall + 4 sections): fail inside the second pair
        analyzer.similarity = Arc::new(FlakySimilarity {
            calls: AtomicUsize::new(0),
            fail_at: 7,
        });
        let resumes = vec![input("r1", RESUME)];
        let jds = vec![input("j1", JD), input("j2", JD)];

        let err = analyzer.analyze_matrix(&resumes, &jds).await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_blank_custom_skill_list_falls_back_to_builtin() {
        let list = vec!["  ".to_string(), String::new()];
        let analyzer = Analyzer::standard(Some(&list)).unwrap();
        assert_eq!(analyzer.skill_count(), 39);
    }
}
