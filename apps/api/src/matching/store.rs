use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::matching::analyzer::MatchAnalysis;
use crate::models::analysis::AnalysisRow;

/// Persists one analysis. `batch_id` groups rows produced by the same batch.
///
/// Takes any executor so a batch can write all of its rows inside one
/// transaction.
pub async fn insert_analysis<'e, E>(
    executor: E,
    batch_id: Option<Uuid>,
    analysis: &MatchAnalysis,
) -> Result<AnalysisRow, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    let row = sqlx::query_as::<_, AnalysisRow>(
        r#"
        INSERT INTO analyses
            (id, batch_id, resume_name, jd_name, overall_score,
             ats_composite_score, ats_keyword_coverage, report)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(batch_id)
    .bind(&analysis.resume_name)
    .bind(&analysis.jd_name)
    .bind(analysis.overall_score)
    .bind(analysis.ats.composite_score)
    .bind(analysis.ats.keyword_coverage)
    .bind(Json(analysis))
    .fetch_one(executor)
    .await?;

    debug!("Stored analysis {}", row.id);
    Ok(row)
}

pub async fn get_analysis(pool: &PgPool, id: Uuid) -> Result<Option<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All rows of a batch in insertion order. Rows of one batch share a
/// transaction and therefore a `created_at`, so order follows `seq`.
pub async fn get_batch(pool: &PgPool, batch_id: Uuid) -> Result<Vec<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>(
        "SELECT * FROM analyses WHERE batch_id = $1 ORDER BY seq",
    )
    .bind(batch_id)
    .fetch_all(pool)
    .await
}
