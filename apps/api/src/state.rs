use sqlx::PgPool;

use crate::config::Config;
use crate::matching::Analyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Normalizer, ATS scorer, skill extractor and similarity backend,
    /// built once at startup and shared read-only.
    pub analyzer: Analyzer,
}
