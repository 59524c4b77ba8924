//! LLM Client: the single point of entry for remote text generation.
//!
//! ARCHITECTURAL RULE: No other module may call the inference API directly.
//! Callers depend on the `TextGenerator` trait, never on `HfInferenceClient`.
//!
//! One attempt per call, no retries: callers own the fallback.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Default Hugging Face model used for recommendations.
pub const DEFAULT_MODEL: &str = "microsoft/Phi-3-mini-4k-instruct";
const DEFAULT_MODEL_LABEL: &str = "Phi-3-mini (Hugging Face)";
const MAX_NEW_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No inference credential configured (env var '{0}' is unset)")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Inference returned empty content")]
    EmptyContent,

    #[error("Inference timed out after {0:?}")]
    Timeout(Duration),
}

/// Prompt in, free text out. May fail; failure is an ordinary value.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provenance label attached to anything built from this generator's output.
    fn model_label(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// The endpoint answers with either a list of generations or a single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl InferenceResponse {
    fn into_text(self) -> Option<String> {
        match self {
            InferenceResponse::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
            InferenceResponse::Single(g) => Some(g.generated_text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Hugging Face Inference API text-generation client.
///
/// The access token is read from the environment on every call, so an
/// unset token simply yields `GenerationError::MissingCredential`.
#[derive(Clone)]
pub struct HfInferenceClient {
    client: Client,
    endpoint: String,
    model: String,
    token_var: String,
}

impl HfInferenceClient {
    pub fn new(
        api_url: &str,
        model: &str,
        token_var: &str,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: format!("{}/{}", api_url.trim_end_matches('/'), model),
            model: model.to_string(),
            token_var: token_var.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        Self::new(
            &config.hf_api_url,
            &config.hf_model,
            &config.hf_token_var,
            config.hf_timeout(),
        )
    }

    fn token(&self) -> Result<String, GenerationError> {
        std::env::var(&self.token_var)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(self.token_var.clone()))
    }
}

#[async_trait]
impl TextGenerator for HfInferenceClient {
    fn model_label(&self) -> &str {
        if self.model == DEFAULT_MODEL {
            DEFAULT_MODEL_LABEL
        } else {
            &self.model
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let token = self.token()?;

        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<InferenceErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let text = serde_json::from_str::<InferenceResponse>(&body)?
            .into_text()
            .filter(|t| !t.trim().is_empty())
            .ok_or(GenerationError::EmptyContent)?;

        debug!("Inference call succeeded: {} chars generated", text.len());

        Ok(text)
    }
}
