use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo-1106";
const DEFAULT_ALLOWED_ORIGIN: &str = "https://vaitengewon.club";
/// Upper bound for WEBHOOK_MAX_RETRIES; keeps worst-case request latency bounded.
pub const MAX_WEBHOOK_RETRIES: u32 = 5;

/// Application configuration loaded from environment variables.
/// Fails at startup if the LLM credential is missing. The webhook settings are
/// optional here and fail closed at delivery time instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub webhook_url: Option<String>,
    pub webhook_api_key: Option<String>,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout: Duration,
    pub webhook_timeout: Duration,
    pub webhook_max_retries: u32,
    pub webhook_retry_base: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            webhook_url: optional_env("WORDPRESS_API_URL"),
            webhook_api_key: optional_env("WORDPRESS_API_KEY"),
            allowed_origins: parse_origins(
                &std::env::var("ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string()),
            ),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 60)?),
            webhook_timeout: Duration::from_secs(parse_env("WEBHOOK_TIMEOUT_SECS", 15)?),
            webhook_max_retries: check_max_retries(parse_env("WEBHOOK_MAX_RETRIES", 2)?)?,
            webhook_retry_base: Duration::from_millis(parse_env("WEBHOOK_RETRY_BASE_MS", 500)?),
        })
    }

    /// True when any origin may call the API (`ALLOWED_ORIGINS=*`).
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an env var, treating unset and blank values the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn check_max_retries(retries: u32) -> Result<u32> {
    anyhow::ensure!(
        retries <= MAX_WEBHOOK_RETRIES,
        "WEBHOOK_MAX_RETRIES must be at most {MAX_WEBHOOK_RETRIES}, got {retries}"
    );
    Ok(retries)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
impl Config {
    /// Configuration for tests: no real endpoints, fast retries.
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "http://127.0.0.1:9".to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            webhook_url: None,
            webhook_api_key: None,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            port: 0,
            rust_log: "debug".to_string(),
            llm_timeout: Duration::from_secs(5),
            webhook_timeout: Duration::from_secs(5),
            webhook_max_retries: 2,
            webhook_retry_base: Duration::from_millis(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins(" https://a.example/ , https://b.example,,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_webhook_retries_are_bounded() {
        assert_eq!(check_max_retries(0).unwrap(), 0);
        assert_eq!(check_max_retries(MAX_WEBHOOK_RETRIES).unwrap(), MAX_WEBHOOK_RETRIES);
        let err = check_max_retries(40).unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_MAX_RETRIES"));
    }

    #[test]
    fn test_wildcard_origin_detected() {
        let mut config = Config::for_tests();
        assert!(!config.allows_any_origin());
        config.allowed_origins = parse_origins("*");
        assert!(config.allows_any_origin());
    }
}
