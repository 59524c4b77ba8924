use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Nothing is required: the inference credential is read per call, not here.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Name of the env var holding the inference access token.
    pub hf_token_var: String,
    pub hf_api_url: String,
    pub hf_model: String,
    pub hf_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            hf_token_var: env_or("HF_TOKEN_VAR", "HF_TOKEN"),
            hf_api_url: env_or("HF_API_URL", "https://api-inference.huggingface.co/models"),
            hf_model: env_or("HF_MODEL", DEFAULT_MODEL),
            hf_timeout_secs: env_or("HF_TIMEOUT_SECS", "8")
                .parse::<u64>()
                .context("HF_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }

    pub fn hf_timeout(&self) -> Duration {
        Duration::from_secs(self.hf_timeout_secs)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
