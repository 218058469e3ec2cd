use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub bind_addr: String,
    pub provider_timeout: Duration,
    pub max_upload_bytes: usize,
    pub expose_raw_response: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let gemini_api_key = get("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set in the environment or .env file")?;

        let provider_timeout_secs = match get("PROVIDER_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .with_context(|| format!("PROVIDER_TIMEOUT_SECS must be a positive integer, got '{}'", v))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{}'", v))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let expose_raw_response = match get("EXPOSE_RAW_RESPONSE") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("EXPOSE_RAW_RESPONSE must be true or false, got '{}'", v))?,
            None => true,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            max_upload_bytes,
            expose_raw_response,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
