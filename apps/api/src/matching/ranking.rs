//! Finalist ranking: best candidates per job description within a batch.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::analysis::AnalysisRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBy {
    /// Whole-document similarity.
    #[default]
    Overall,
    /// ATS composite score.
    Ats,
}

impl ScoreBy {
    fn score(self, row: &AnalysisRow) -> f64 {
        match self {
            ScoreBy::Overall => row.overall_score,
            ScoreBy::Ats => row.ats_composite_score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub analysis_id: Uuid,
    pub resume_name: String,
    pub overall_score: f64,
    pub ats_composite_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JdRanking {
    pub jd_name: String,
    pub finalists: Vec<RankedCandidate>,
}

/// Groups rows by job description (first-appearance order), sorts each group
/// by the chosen score descending and keeps the top `top_n`. Ties keep input
/// order.
pub fn rank_best_per_jd(rows: &[AnalysisRow], score_by: ScoreBy, top_n: usize) -> Vec<JdRanking> {
    let mut groups: Vec<(&str, Vec<&AnalysisRow>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(jd, _)| *jd == row.jd_name) {
            Some((_, members)) => members.push(row),
            None => groups.push((row.jd_name.as_str(), vec![row])),
        }
    }

    groups
        .into_iter()
        .map(|(jd_name, mut members)| {
            members.sort_by(|a, b| {
                score_by
                    .score(b)
                    .partial_cmp(&score_by.score(a))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            JdRanking {
                jd_name: jd_name.to_string(),
                finalists: members
                    .into_iter()
                    .take(top_n)
                    .map(|row| RankedCandidate {
                        analysis_id: row.id,
                        resume_name: row.resume_name.clone(),
                        overall_score: row.overall_score,
                        ats_composite_score: row.ats_composite_score,
                    })
                    .collect(),
            }
        })
        .collect()
}
