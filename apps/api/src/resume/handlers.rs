use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::store::{
    count_versions, delete_version, find_base, find_version, list_versions, upsert_base,
};
use super::validation::parse_resume_body;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extractors::ApiJson;
use crate::render::render_resume_pdf_blocking;
use crate::state::AppState;

const VERSION_NOT_FOUND: &str = "Resume version not found";

/// POST /api/resume/base
pub async fn save_base(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<Value>, AppError> {
    let content = parse_resume_body(body)?;
    let existed = find_base(&state.db, auth.id).await?.is_some();
    let resume = upsert_base(&state.db, auth.id, &content).await?;

    let message = if existed {
        "Resume updated successfully"
    } else {
        "Resume created successfully"
    };
    info!("{message} for user {}", auth.id);

    Ok(Json(json!({ "success": true, "message": message, "resume": resume })))
}

/// GET /api/resume/base
pub async fn get_base(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let resume = find_base(&state.db, auth.id).await?.ok_or_else(|| {
        AppError::NotFound("No base resume found. Please create one first.".to_string())
    })?;
    Ok(Json(json!({ "success": true, "resume": resume })))
}

/// GET /api/resume/versions
pub async fn get_versions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let versions = list_versions(&state.db, auth.id).await?;
    Ok(Json(json!({
        "success": true,
        "count": versions.len(),
        "versions": versions,
    })))
}

/// GET /api/resume/versions/:id
pub async fn get_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_version_id(&id)?;
    let version = find_version(&state.db, id, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound(VERSION_NOT_FOUND.to_string()))?;
    Ok(Json(json!({ "success": true, "version": version })))
}

/// DELETE /api/resume/versions/:id
pub async fn remove_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_version_id(&id)?;
    if !delete_version(&state.db, id, auth.id).await? {
        return Err(AppError::NotFound(VERSION_NOT_FOUND.to_string()));
    }
    info!("Deleted resume version {id}");
    Ok(Json(json!({
        "success": true,
        "message": "Resume version deleted successfully",
    })))
}

/// GET /api/resume/stats
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let has_base = find_base(&state.db, auth.id).await?.is_some();
    let total = count_versions(&state.db, auth.id).await?;
    Ok(Json(json!({
        "success": true,
        "stats": { "hasBaseResume": has_base, "totalVersions": total },
    })))
}

/// GET /api/resume/pdf/:id
pub async fn download_pdf(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_version_id(&id)?;
    let version = find_version(&state.db, id, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound(VERSION_NOT_FOUND.to_string()))?;

    let filename = pdf_filename(&version.adapted_content, &version.role);
    let pdf = render_resume_pdf_blocking(version.adapted_content).await?;
    info!("Rendered {} ({} bytes)", filename, pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// Unparseable ids cannot match a row, so they read as missing.
fn parse_version_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(VERSION_NOT_FOUND.to_string()))
}

/// `{name}_{role}.pdf` with whitespace runs collapsed to `_`. Characters that
/// cannot appear in a quoted header value are replaced too.
pub fn pdf_filename(adapted_content: &Value, role: &str) -> String {
    let name = adapted_content["personal_info"]["name"]
        .as_str()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Resume");

    let raw = format!("{name}_{role}.pdf");
    let mut filename = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_space {
                filename.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        filename.push(if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' });
    }
    filename
}
