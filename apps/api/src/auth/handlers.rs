use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::password::{hash_password, verify_password};
use super::users::{find_by_email, find_by_id, insert_user, is_unique_violation};
use super::{AuthError, AuthUser};
use crate::errors::AppError;
use crate::extractors::ApiJson;
use crate::extraction::validation::looks_like_email;
use crate::state::AppState;

const MIN_PASSWORD_CHARS: usize = 6;
const MIN_NAME_CHARS: usize = 2;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration input after trimming and e-mail normalisation.
#[derive(Debug, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub fn validate_registration(req: RegisterRequest) -> Result<NewAccount, AppError> {
    let email = req.email.trim().to_lowercase();
    if !looks_like_email(&email) {
        return Err(AppError::Validation("Please provide a valid email".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(AppError::Validation(
            "Name must be at least 2 characters".to_string(),
        ));
    }
    Ok(NewAccount {
        email,
        password: req.password,
        name: name.to_string(),
    })
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let account = validate_registration(req)?;

    if find_by_email(&state.db, &account.email).await?.is_some() {
        return Err(AppError::Validation(
            "User already exists with this email".to_string(),
        ));
    }

    let password_hash = hash_password(account.password).await?;
    let user = insert_user(&state.db, &account.email, &password_hash, &account.name)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Validation("User already exists with this email".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

    let token = state.jwt.issue(user.id, &user.email)?;
    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "token": token,
            "user": user,
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Please provide email and password".to_string(),
        ));
    }

    let user = find_by_email(&state.db, req.email.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(req.password, user.password_hash.clone()).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state.jwt.issue(user.id, &user.email)?;
    info!("User {} logged in", user.id);

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "user": user,
    })))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Value>, AppError> {
    let user = find_by_id(&state.db, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "success": true, "user": user })))
}
