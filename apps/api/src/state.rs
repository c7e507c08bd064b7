use axum::extract::FromRef;
use sqlx::PgPool;

use crate::ai_client::AiClient;
use crate::auth::JwtKeys;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Gemini/Groq fallback pair, built once at startup.
    pub ai: AiClient,
    pub config: Config,
    pub jwt: JwtKeys,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
