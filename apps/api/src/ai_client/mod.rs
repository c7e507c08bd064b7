/// AI Client: the single point of entry for all LLM calls in CVMorph.
///
/// No other module talks to a model API directly. Gemini is the primary
/// provider and Groq the fallback; each is tried at most once per request.
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;

pub mod gemini;
pub mod groq;
pub mod prompts;
pub mod provider;
pub mod response;
#[cfg(test)]
pub mod testing;

use gemini::GeminiProvider;
use groq::GroqProvider;
pub use provider::{FailureKind, ProviderError, TextProvider};

const NO_PROVIDER: &str = "None";

/// Terminal failures of [`AiClient::generate`]. The display text is shown to users.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("All AI providers failed. Please try with a shorter resume or try again later.")]
    AllProvidersFailed,

    #[error("No AI providers available. Please configure GEMINI_API_KEY or GROQ_API_KEY.")]
    NoProviders,
}

/// Model output together with the provider that produced it.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub provider: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ProviderAvailability {
    pub configured: bool,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProviderStatus {
    pub gemini: ProviderAvailability,
    pub groq: ProviderAvailability,
}

/// Primary/fallback pair of text providers. Cheap to clone; shared via `AppState`.
#[derive(Clone)]
pub struct AiClient {
    primary: Option<Arc<dyn TextProvider>>,
    fallback: Option<Arc<dyn TextProvider>>,
}

impl AiClient {
    pub fn new(
        primary: Option<Arc<dyn TextProvider>>,
        fallback: Option<Arc<dyn TextProvider>>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// Builds Gemini (primary) and Groq (fallback) for whichever keys are configured.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let primary = match &config.gemini_api_key {
            Some(key) => Some(Arc::new(GeminiProvider::new(
                key.clone(),
                config.gemini_model.clone(),
            )?) as Arc<dyn TextProvider>),
            None => None,
        };
        let fallback = match &config.groq_api_key {
            Some(key) => Some(
                Arc::new(GroqProvider::new(key.clone(), config.groq_model.clone())?)
                    as Arc<dyn TextProvider>,
            ),
            None => None,
        };
        Ok(Self::new(primary, fallback))
    }

    /// Sends `prompt` to the primary provider, falling through to the fallback on
    /// error or empty output. Neither provider is retried.
    pub async fn generate(&self, prompt: &str) -> Result<Generation, AiError> {
        match &self.primary {
            Some(primary) => {
                info!("Attempting {} (primary)...", primary.name());
                match attempt(primary.as_ref(), prompt).await {
                    Ok(generation) => return Ok(generation),
                    Err(e) => {
                        warn!("{} failed: {e}", primary.name());
                        match e.kind() {
                            FailureKind::QuotaExceeded => {
                                info!("{} quota exceeded, falling back", primary.name())
                            }
                            FailureKind::Empty => {
                                info!("{} returned empty output, falling back", primary.name())
                            }
                            FailureKind::Other => {
                                info!("{} error, trying fallback", primary.name())
                            }
                        }
                    }
                }
            }
            None => warn!("Primary AI provider not configured"),
        }

        let Some(fallback) = &self.fallback else {
            warn!("Fallback AI provider not configured");
            return Err(AiError::NoProviders);
        };

        info!("Attempting {} (fallback)...", fallback.name());
        attempt(fallback.as_ref(), prompt).await.map_err(|e| {
            error!("{} also failed: {e}", fallback.name());
            AiError::AllProvidersFailed
        })
    }

    pub fn status(&self) -> ProviderStatus {
        let slot = |name: &str| {
            let present = [&self.primary, &self.fallback]
                .into_iter()
                .flatten()
                .any(|p| p.name() == name);
            ProviderAvailability {
                configured: present,
                available: present,
            }
        };
        ProviderStatus {
            gemini: slot("Gemini"),
            groq: slot("Groq"),
        }
    }

    /// The provider tried first: the primary if configured, else the fallback.
    pub fn primary_provider(&self) -> &'static str {
        self.primary
            .as_ref()
            .or(self.fallback.as_ref())
            .map(|p| p.name())
            .unwrap_or(NO_PROVIDER)
    }

    pub fn fallback_provider(&self) -> &'static str {
        self.fallback
            .as_ref()
            .map(|p| p.name())
            .unwrap_or(NO_PROVIDER)
    }
}

/// One call to one provider. Blank output counts as a failure.
async fn attempt(provider: &dyn TextProvider, prompt: &str) -> Result<Generation, ProviderError> {
    let text = provider.generate(prompt).await?;
    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse {
            provider: provider.name(),
        });
    }
    info!(
        "{} succeeded, response length: {} characters",
        provider.name(),
        text.len()
    );
    Ok(Generation {
        text,
        provider: provider.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedProvider;
    use super::*;

    fn client(
        primary: Option<Arc<ScriptedProvider>>,
        fallback: Option<Arc<ScriptedProvider>>,
    ) -> AiClient {
        AiClient::new(
            primary.map(|p| p as Arc<dyn TextProvider>),
            fallback.map(|p| p as Arc<dyn TextProvider>),
        )
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let gemini = ScriptedProvider::replying("Gemini", "{\"a\": 1}");
        let groq = ScriptedProvider::replying("Groq", "{\"b\": 2}");
        let ai = client(Some(gemini.clone()), Some(groq.clone()));

        let generation = ai.generate("prompt").await.unwrap();

        assert_eq!(generation.text, "{\"a\": 1}");
        assert_eq!(generation.provider, "Gemini");
        assert_eq!(gemini.calls(), 1);
        assert_eq!(groq.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_error_tries_fallback_exactly_once() {
        let gemini = ScriptedProvider::failing("Gemini", 500);
        let groq = ScriptedProvider::replying("Groq", "{\"b\": 2}");
        let ai = client(Some(gemini.clone()), Some(groq.clone()));

        let generation = ai.generate("prompt").await.unwrap();

        assert_eq!(generation.provider, "Groq");
        assert_eq!(gemini.calls(), 1);
        assert_eq!(groq.calls(), 1);
    }

    #[tokio::test]
    async fn test_primary_empty_output_falls_back() {
        let gemini = ScriptedProvider::replying("Gemini", "   \n");
        let groq = ScriptedProvider::replying("Groq", "{}");
        let ai = client(Some(gemini.clone()), Some(groq.clone()));

        let generation = ai.generate("prompt").await.unwrap();

        assert_eq!(generation.provider, "Groq");
        assert_eq!(groq.calls(), 1);
    }

    #[tokio::test]
    async fn test_both_fail_is_terminal() {
        let gemini = ScriptedProvider::failing("Gemini", 429);
        let groq = ScriptedProvider::failing("Groq", 503);
        let ai = client(Some(gemini.clone()), Some(groq.clone()));

        let err = ai.generate("prompt").await.unwrap_err();

        assert!(matches!(err, AiError::AllProvidersFailed));
        assert_eq!(gemini.calls(), 1);
        assert_eq!(groq.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_empty_output_is_terminal() {
        let gemini = ScriptedProvider::failing("Gemini", 500);
        let groq = ScriptedProvider::replying("Groq", "");
        let ai = client(Some(gemini), Some(groq));

        assert!(matches!(
            ai.generate("prompt").await.unwrap_err(),
            AiError::AllProvidersFailed
        ));
    }

    #[tokio::test]
    async fn test_primary_failure_without_fallback_reports_no_providers() {
        let gemini = ScriptedProvider::failing("Gemini", 500);
        let ai = client(Some(gemini.clone()), None);

        let err = ai.generate("prompt").await.unwrap_err();

        assert!(matches!(err, AiError::NoProviders));
        assert_eq!(gemini.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_only_is_used_directly() {
        let groq = ScriptedProvider::replying("Groq", "{}");
        let ai = client(None, Some(groq.clone()));

        let generation = ai.generate("prompt").await.unwrap();

        assert_eq!(generation.provider, "Groq");
        assert_eq!(groq.calls(), 1);
    }

    #[tokio::test]
    async fn test_nothing_configured() {
        let ai = client(None, None);
        assert!(matches!(
            ai.generate("prompt").await.unwrap_err(),
            AiError::NoProviders
        ));
    }

    #[test]
    fn test_status_and_provider_names() {
        let ai = client(
            Some(ScriptedProvider::replying("Gemini", "{}")),
            Some(ScriptedProvider::replying("Groq", "{}")),
        );
        let status = ai.status();
        assert!(status.gemini.configured && status.gemini.available);
        assert!(status.groq.configured);
        assert_eq!(ai.primary_provider(), "Gemini");
        assert_eq!(ai.fallback_provider(), "Groq");
    }

    #[test]
    fn test_provider_names_when_only_groq() {
        let ai = client(None, Some(ScriptedProvider::replying("Groq", "{}")));
        assert!(!ai.status().gemini.configured);
        assert_eq!(ai.primary_provider(), "Groq");
        assert_eq!(ai.fallback_provider(), "Groq");
    }

    #[test]
    fn test_provider_names_when_unconfigured() {
        let ai = client(None, None);
        assert_eq!(ai.primary_provider(), "None");
        assert_eq!(ai.fallback_provider(), "None");
    }

    #[test]
    fn test_from_config_builds_configured_slots() {
        let config = Config {
            database_url: "postgres://localhost/cvmorph".to_string(),
            jwt_secret: "secret".to_string(),
            jwt_expires_in_days: 7,
            gemini_api_key: None,
            gemini_model: crate::config::DEFAULT_GEMINI_MODEL.to_string(),
            groq_api_key: Some("gsk".to_string()),
            groq_model: crate::config::DEFAULT_GROQ_MODEL.to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            app_env: "test".to_string(),
            port: 5000,
            rust_log: "info".to_string(),
        };
        let ai = AiClient::from_config(&config).unwrap();
        assert_eq!(ai.primary_provider(), "Groq");
        assert!(!ai.status().gemini.configured);
        assert!(ai.status().groq.configured);
    }
}
