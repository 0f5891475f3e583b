use std::collections::BTreeSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ats::{format_suggestions, AtsReport};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AtsReportRequest {
    /// Raw resume text; cleaned before scoring.
    pub resume_text: String,
    /// Skills found in both resume and job description.
    pub matched_skills: Vec<String>,
    pub jd_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AtsReportResponse {
    pub report: AtsReport,
    pub suggestions: Vec<String>,
}

/// POST /api/v1/ats/report
///
/// Scores a resume with caller-supplied skill sets. Skills are lower-cased
/// and de-duplicated before counting.
pub async fn handle_ats_report(
    State(state): State<AppState>,
    Json(request): Json<AtsReportRequest>,
) -> Result<Json<AtsReportResponse>, AppError> {
    let cleaned = state.analyzer.normalizer.clean(&request.resume_text);
    let matched = skill_set(&request.matched_skills);
    let jd_skills = skill_set(&request.jd_skills);

    let report = state.analyzer.ats.composite_report(&cleaned, &matched, &jd_skills);
    let suggestions = format_suggestions(&report.sections_missing, &report.format_issues);

    Ok(Json(AtsReportResponse {
        report,
        suggestions,
    }))
}

fn skill_set(skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
