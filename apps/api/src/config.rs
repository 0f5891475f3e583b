use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Replaces the built-in skill dictionary when set.
    pub skill_list: Option<Vec<String>>,
    /// Default finalists per job description in batch rankings.
    pub rank_top_n: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_list: std::env::var("SKILL_LIST")
                .ok()
                .map(|raw| parse_skill_list(&raw))
                .filter(|list| !list.is_empty()),
            rank_top_n: parse_env("RANK_TOP_N", 3)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated, trimmed, lower-cased; blanks dropped.
fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skill_list() {
        assert_eq!(
            parse_skill_list(" Rust, tokio ,,SQL "),
            vec!["rust".to_string(), "tokio".to_string(), "sql".to_string()]
        );
        assert!(parse_skill_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_env_default_and_error() {
        assert_eq!(parse_env::<u16>("REVIEWER_TEST_UNSET_PORT", 8080).unwrap(), 8080);

        std::env::set_var("REVIEWER_TEST_BAD_TOP_N", "three");
        assert!(parse_env::<usize>("REVIEWER_TEST_BAD_TOP_N", 3).is_err());

        std::env::set_var("REVIEWER_TEST_GOOD_TOP_N", " 5 ");
        assert_eq!(parse_env::<usize>("REVIEWER_TEST_GOOD_TOP_N", 3).unwrap(), 5);
    }
}
