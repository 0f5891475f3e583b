use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub batch_id: Option<Uuid>,
    pub resume_name: String,
    pub jd_name: String,
    pub overall_score: f64,
    pub ats_composite_score: f64,
    pub ats_keyword_coverage: f64,
    /// Full `MatchAnalysis` as JSON.
    pub report: Value,
    pub created_at: DateTime<Utc>,
}
