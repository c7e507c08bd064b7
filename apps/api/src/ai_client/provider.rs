//! Provider seam for the AI client.
//!
//! Each backend turns a prompt into raw model text. Fallback ordering and
//! empty-response handling live in [`super::AiClient`], not here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Per-request timeout applied to every provider's HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response from {provider}")]
    EmptyResponse { provider: &'static str },
}

/// Why a provider attempt failed. Only used to pick the log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    QuotaExceeded,
    Empty,
    Other,
}

impl ProviderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::EmptyResponse { .. } => FailureKind::Empty,
            ProviderError::Api { status: 429, .. } => FailureKind::QuotaExceeded,
            ProviderError::Api { message, .. } => {
                let lower = message.to_lowercase();
                if lower.contains("quota") || lower.contains("rate limit") {
                    FailureKind::QuotaExceeded
                } else {
                    FailureKind::Other
                }
            }
            ProviderError::Http(e) if e.status().map(|s| s.as_u16()) == Some(429) => {
                FailureKind::QuotaExceeded
            }
            ProviderError::Http(_) => FailureKind::Other,
        }
    }
}

/// A text-generation backend. Implementations make exactly one HTTP call per
/// `generate` and never retry.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Display name used in logs and API responses ("Gemini", "Groq").
    fn name(&self) -> &'static str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

pub(crate) fn build_http_client() -> Result<Client, ProviderError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Builds an `Api` error from a non-2xx response body. Both Gemini and the
/// OpenAI-compatible APIs wrap failures as `{"error": {"message": ...}}`.
pub(crate) fn api_error(status: u16, body: String) -> ProviderError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    ProviderError::Api { status, message }
}
