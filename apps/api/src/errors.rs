use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ai_client::AiError;
use crate::auth::AuthError;
use crate::extraction::ExtractionError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    /// The model answered, but not with a parseable JSON object.
    #[error("Malformed AI output: {message}")]
    MalformedAiOutput { message: String, debug: String },

    #[error("PDF error: {0}")]
    Pdf(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(msg) | AuthError::Signing(msg) => {
                AppError::Internal(anyhow::anyhow!(msg))
            }
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, debug) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                    None,
                )
            }
            AppError::Ai(e) => {
                tracing::error!("AI error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
            }
            AppError::MalformedAiOutput { message, debug } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(debug))
            }
            AppError::Pdf(e) => {
                tracing::error!("PDF error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate PDF".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match debug {
            Some(debug) => json!({ "success": false, "message": message, "debug": debug }),
            None => json!({ "success": false, "message": message }),
        };

        (status, Json(body)).into_response()
    }
}
