use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::text::SectionMap;

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub cleaned: String,
    pub sections: SectionMap,
}

/// POST /api/v1/normalize
///
/// Returns the cleaned text and its section map. Never rejects text: empty
/// input yields empty output.
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(request): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, AppError> {
    let normalizer = &state.analyzer.normalizer;
    let cleaned = normalizer.clean(&request.text);
    let sections = normalizer.extract_sections(&cleaned);
    Ok(Json(NormalizeResponse { cleaned, sections }))
}
