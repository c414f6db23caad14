//! Text-generation collaborator
//!
//! Gemini REST client behind the `TextGenerator` trait, with a per-request
//! timeout and a single retry on transient failures. Failures never cross
//! the orchestrator boundary as errors; they are rendered into plan text
//! beginning with "Error".

use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::RetryTransientMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::GenerationConfig;
use crate::error::TripSmithError;

/// Errors that can occur while requesting itinerary text
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Empty response.")]
    Empty,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// External text-generation collaborator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a fully assembled prompt and return the generated itinerary
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Gemini `generateContent` API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: ClientWithMiddleware,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// The API key comes from the config file or the `GEMINI_API_KEY`
    /// environment variable.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, TripSmithError> {
        let api_key = config.api_key()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("tripsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripSmithError::api(format!("Failed to create HTTP client: {e}")))?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let http = reqwest_middleware::ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "requesting itinerary generation");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "generation request rejected");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        body.first_text().ok_or(GenerationError::Empty)
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
            .filter(|text| !text.is_empty())
    }
}
