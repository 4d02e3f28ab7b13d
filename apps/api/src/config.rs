use std::str::FromStr;

use anyhow::{Context, Result};

use crate::scoring::suggest::DEFAULT_MAX_SUGGESTIONS;

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults suit local development.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Request body cap in bytes, enforced by `RequestBodyLimitLayer`.
    pub max_body_bytes: usize,
    /// Initial telemetry opt-in for a store that has no privacy settings yet.
    pub telemetry_enabled: bool,
    /// Suggestions returned when a request does not ask for a count.
    pub max_suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_body_bytes: 50 * 1024,
            telemetry_enabled: false,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_body_bytes: parse_env("MAX_BODY_BYTES", defaults.max_body_bytes)?,
            telemetry_enabled: parse_env("TELEMETRY_ENABLED", defaults.telemetry_enabled)?,
            max_suggestions: parse_env("MAX_SUGGESTIONS", defaults.max_suggestions)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_body_bytes, 51200);
        assert!(!config.telemetry_enabled);
        assert_eq!(config.max_suggestions, 5);
    }

    #[test]
    fn test_parse_env_falls_back_and_rejects_garbage() {
        assert_eq!(parse_env("RESUME_LAB_TEST_UNSET_VAR", 7usize).unwrap(), 7);

        std::env::set_var("RESUME_LAB_TEST_BAD_PORT", "eighty");
        assert!(parse_env::<u16>("RESUME_LAB_TEST_BAD_PORT", 8080).is_err());

        std::env::set_var("RESUME_LAB_TEST_FLAG", " true ");
        assert!(parse_env("RESUME_LAB_TEST_FLAG", false).unwrap());
    }
}
