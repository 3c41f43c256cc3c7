use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 6 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
    /// Present when S3_BUCKET is set; original uploads are archived there.
    pub archive: Option<ArchiveConfig>,
}

#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let archive = optional_env("S3_BUCKET").map(|bucket| ArchiveConfig {
            bucket,
            endpoint: optional_env("S3_ENDPOINT"),
            access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
        });

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port: parse_or_default("PORT", optional_env("PORT"), DEFAULT_PORT)?,
            max_upload_bytes: parse_or_default(
                "MAX_UPLOAD_BYTES",
                optional_env("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            archive,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_uses_default() {
        let port: u16 = parse_or_default("PORT", None, 4000).unwrap();
        assert_eq!(port, 4000);
    }

    #[test]
    fn test_value_is_parsed() {
        let port: u16 = parse_or_default("PORT", Some(" 8081 ".to_string()), 4000).unwrap();
        assert_eq!(port, 8081);
    }

    #[test]
    fn test_invalid_value_names_the_variable() {
        let err = parse_or_default::<u16>("PORT", Some("eighty".to_string()), 4000).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
