//! Axum route handlers for the Analysis and Batch APIs.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::analyzer::{DocumentInput, MatchAnalysis};
use crate::matching::ranking::{rank_best_per_jd, JdRanking, ScoreBy};
use crate::matching::store::{get_analysis, get_batch, insert_analysis};
use crate::models::analysis::AnalysisRow;
use crate::state::AppState;
use crate::text::extract::extract_text;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateAnalysisRequest {
    pub resume_name: String,
    pub resume_text: String,
    pub jd_name: String,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub analysis: MatchAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub resumes: Vec<DocumentInput>,
    pub jds: Vec<DocumentInput>,
}

/// One cell of the resume × JD matrix.
#[derive(Debug, Serialize)]
pub struct BatchRow {
    pub analysis_id: Uuid,
    pub resume_name: String,
    pub jd_name: String,
    pub overall_score: f64,
    pub ats_composite_score: f64,
    pub ats_keyword_coverage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub batch_id: Uuid,
    pub total: usize,
    pub rows: Vec<BatchRow>,
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub top_n: Option<usize>,
    pub score_by: Option<ScoreBy>,
}

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub batch_id: Uuid,
    pub score_by: ScoreBy,
    pub top_n: usize,
    pub rankings: Vec<JdRanking>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyses
///
/// Analyses one resume against one job description and stores the result.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(request): Json<CreateAnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume = DocumentInput {
        name: request.resume_name,
        text: request.resume_text,
    };
    let jd = DocumentInput {
        name: request.jd_name,
        text: request.jd_text,
    };
    require_text(&resume, "resume_text")?;
    require_text(&jd, "jd_text")?;

    analyze_and_store(&state, &resume, &jd).await.map(Json)
}

/// POST /api/v1/analyses/upload
///
/// Multipart form with `resume` and `jd` file fields (PDF or TXT).
pub async fn handle_upload_analysis(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut resume = None;
    let mut jd = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        let slot = match field_name.as_str() {
            "resume" => &mut resume,
            "jd" => &mut jd,
            _ => continue,
        };

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(format!("Field '{field_name}' must be a file")))?;
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read '{field_name}': {e}")))?;

        *slot = Some(read_upload(file_name, data).await?);
    }

    let resume = resume.ok_or_else(|| AppError::Validation("Missing 'resume' file".into()))?;
    let jd = jd.ok_or_else(|| AppError::Validation("Missing 'jd' file".into()))?;
    require_text(&resume, "resume")?;
    require_text(&jd, "jd")?;

    analyze_and_store(&state, &resume, &jd).await.map(Json)
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisRow>, AppError> {
    let row = get_analysis(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(row))
}

/// POST /api/v1/batches
///
/// Analyses every resume against every job description. Rows are stored
/// under a fresh batch id, in resume-major order.
pub async fn handle_create_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    if request.resumes.is_empty() || request.jds.is_empty() {
        return Err(AppError::Validation(
            "A batch needs at least one resume and one job description".to_string(),
        ));
    }
    for doc in request.resumes.iter().chain(&request.jds) {
        require_text(doc, &doc.name)?;
    }

    let batch_id = Uuid::new_v4();
    let total = request.resumes.len() * request.jds.len();
    info!("Batch {batch_id}: {total} analyses");

    // Nothing is written until every pair has been analysed; rows are
    // committed together.
    let analyses = state
        .analyzer
        .analyze_matrix(&request.resumes, &request.jds)
        .await?;

    let mut tx = state.db.begin().await?;
    let mut rows = Vec::with_capacity(total);
    for analysis in analyses {
        let stored = insert_analysis(&mut *tx, Some(batch_id), &analysis).await?;
        rows.push(BatchRow {
            analysis_id: stored.id,
            resume_name: analysis.resume_name,
            jd_name: analysis.jd_name,
            overall_score: analysis.overall_score,
            ats_composite_score: analysis.ats.composite_score,
            ats_keyword_coverage: analysis.ats.keyword_coverage,
            matched_skills: analysis.skills.matched.into_iter().collect(),
            missing_skills: analysis.skills.missing.into_iter().collect(),
        });
    }
    tx.commit().await?;
    info!("Batch {batch_id}: stored {} rows", rows.len());

    Ok(Json(BatchResponse {
        batch_id,
        total,
        rows,
    }))
}

/// GET /api/v1/batches/:id/ranking?top_n=3&score_by=overall|ats
pub async fn handle_batch_ranking(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<RankingResponse>, AppError> {
    let top_n = query.top_n.unwrap_or(state.config.rank_top_n);
    if top_n == 0 {
        return Err(AppError::Validation("top_n must be at least 1".to_string()));
    }
    let score_by = query.score_by.unwrap_or_default();

    let rows = get_batch(&state.db, batch_id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound(format!("Batch {batch_id} not found")));
    }

    Ok(Json(RankingResponse {
        batch_id,
        score_by,
        top_n,
        rankings: rank_best_per_jd(&rows, score_by, top_n),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn require_text(doc: &DocumentInput, field: &str) -> Result<(), AppError> {
    if doc.text.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

async fn analyze_and_store(
    state: &AppState,
    resume: &DocumentInput,
    jd: &DocumentInput,
) -> Result<AnalysisResponse, AppError> {
    let analysis = state.analyzer.analyze(resume, jd).await?;
    let stored = insert_analysis(&state.db, None, &analysis).await?;
    Ok(AnalysisResponse {
        id: stored.id,
        analysis,
    })
}

/// PDF parsing is CPU-bound, so extraction runs off the async workers.
async fn read_upload(file_name: String, data: Bytes) -> Result<DocumentInput, AppError> {
    let name = file_name.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&file_name, &data))
        .await
        .map_err(|e| extraction_join_error(&name, e))??;
    Ok(DocumentInput { name, text })
}

/// The PDF parser panics on some malformed files; that is a bad upload, not
/// a server fault.
fn extraction_join_error(file_name: &str, err: JoinError) -> AppError {
    if err.is_panic() {
        warn!("Text extraction panicked on {file_name}");
        AppError::UnprocessableEntity(format!("Could not read {file_name}: malformed file"))
    } else {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extraction_panic_is_unprocessable() {
        let err = tokio::task::spawn_blocking(|| -> Result<String, AppError> {
            panic!("malformed xref table")
        })
        .await
        .unwrap_err();

        let mapped = extraction_join_error("broken.pdf", err);
        assert!(matches!(mapped, AppError::UnprocessableEntity(ref msg) if msg.contains("broken.pdf")));
    }

    #[tokio::test]
    async fn test_read_upload_plain_text() {
        let doc = read_upload("cv.txt".to_string(), Bytes::from_static(b"Skills\nRust"))
            .await
            .unwrap();
        assert_eq!(doc.name, "cv.txt");
        assert_eq!(doc.text, "Skills\nRust");
    }

    #[tokio::test]
    async fn test_read_upload_unsupported_extension() {
        let err = read_upload("cv.docx".to_string(), Bytes::from_static(b"PK"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_require_text_rejects_whitespace() {
        let doc = DocumentInput {
            name: "jd.txt".to_string(),
            text: " \n\t".to_string(),
        };
        assert!(matches!(require_text(&doc, "jd_text"), Err(AppError::Validation(_))));
    }
}
