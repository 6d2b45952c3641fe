use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub openai_model: String,
    pub port: u16,
    pub rust_log: String,
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
    pub artifact_ttl: Duration,
    pub artifact_max_entries: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_API_URL.to_string()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_MODEL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 20)?),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            artifact_ttl: Duration::from_secs(parse_env("ARTIFACT_TTL_SECS", 3600)?),
            artifact_max_entries: parse_env("ARTIFACT_MAX_ENTRIES", 256)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional numeric variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
