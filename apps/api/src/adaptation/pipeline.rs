//! Résumé adaptation: prompt construction and JSON-contract enforcement.
//!
//! Flow: build prompt → AI call (once, with provider fallback) → clean →
//!       parse as JSON object → warn on keys outside the résumé schema.
//!
//! Parse failures are terminal for the request. The AI call is never repeated.

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::adaptation::prompts::{ADAPT_PROMPT_TEMPLATE, PARSE_PROMPT_TEMPLATE};
use crate::adaptation::roles::RoleProfile;
use crate::ai_client::response::{clean_json_response, parse_json_object, snippet};
use crate::ai_client::AiClient;
use crate::errors::AppError;
use crate::models::resume::{ResumeContent, RESUME_SECTIONS};

/// Characters of cleaned output returned to the client on parse failure.
const DEBUG_SNIPPET_CHARS: usize = 200;
/// Characters of cleaned output written to the log on parse failure.
const LOG_PREVIEW_CHARS: usize = 500;

pub const ADAPT_PARSE_FAILURE: &str =
    "AI response was incomplete. Please try again or use a shorter resume.";
pub const UPLOAD_PARSE_FAILURE: &str =
    "AI returned incomplete data. Try uploading a simpler resume or use the manual form.";

/// A JSON object produced by the model, with the provider that answered.
#[derive(Debug)]
pub struct AiDocument {
    pub document: Map<String, Value>,
    pub provider: &'static str,
}

pub fn build_adapt_prompt(role: &RoleProfile, base: &ResumeContent) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(&base.to_json())
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(ADAPT_PROMPT_TEMPLATE
        .replace("{role}", role.name)
        .replace("{keywords}", role.keywords)
        .replace("{resume_json}", &resume_json))
}

pub fn build_parse_prompt(raw_text: &str) -> String {
    PARSE_PROMPT_TEMPLATE.replace("{raw_text}", raw_text)
}

/// Sends `prompt` once and enforces the JSON-object contract on the reply.
/// `failure_message` is the user-facing text when the reply does not parse.
pub async fn generate_document(
    ai: &AiClient,
    prompt: &str,
    failure_message: &str,
) -> Result<AiDocument, AppError> {
    let generation = ai.generate(prompt).await?;
    let cleaned = clean_json_response(&generation.text);

    let document = parse_json_object(&cleaned).map_err(|e| {
        error!("Failed to parse AI response from {}: {e}", generation.provider);
        error!("Response preview: {}", snippet(&cleaned, LOG_PREVIEW_CHARS));
        AppError::MalformedAiOutput {
            message: failure_message.to_string(),
            debug: snippet(&cleaned, DEBUG_SNIPPET_CHARS),
        }
    })?;

    warn_unexpected_keys(&document);
    info!("AI document parsed ({} top-level keys)", document.len());

    Ok(AiDocument {
        document,
        provider: generation.provider,
    })
}

/// Top-level keys outside the résumé schema. Logged only; the schema is a prompt contract.
pub fn unexpected_keys(document: &Map<String, Value>) -> Vec<&str> {
    document
        .keys()
        .map(String::as_str)
        .filter(|k| !RESUME_SECTIONS.contains(k))
        .collect()
}

fn warn_unexpected_keys(document: &Map<String, Value>) {
    let extra = unexpected_keys(document);
    if !extra.is_empty() {
        warn!("AI output contains keys outside the resume schema: {extra:?}");
    }
}
