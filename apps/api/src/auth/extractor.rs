//! Axum extractor for bearer-token authentication.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use super::{AuthError, JwtKeys};
use crate::errors::AppError;

/// The caller identified by a valid `Authorization: Bearer <jwt>` header.
/// Rejects with 401 when the header is missing or the token does not verify.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    JwtKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = JwtKeys::from_ref(state).verify(token)?;
        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}
