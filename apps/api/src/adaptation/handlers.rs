use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::pipeline::{
    build_adapt_prompt, build_parse_prompt, generate_document, ADAPT_PARSE_FAILURE,
    UPLOAD_PARSE_FAILURE,
};
use super::roles::{find_role, ROLES};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extractors::ApiJson;
use crate::extraction::{extract_text, validate_resume_text, UploadedFile, MAX_UPLOAD_BYTES};
use crate::resume::store::{find_base, insert_version, NewVersion};
use crate::state::AppState;

/// Multipart field carrying the résumé file.
pub const UPLOAD_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct AdaptRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "jobDescription", alias = "job_description")]
    pub job_description: Option<String>,
}

/// POST /api/ai/adapt
pub async fn adapt_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<AdaptRequest>,
) -> Result<Json<Value>, AppError> {
    let role_name = req
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("Role is required".to_string()))?;

    let base = find_base(&state.db, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Please create a base resume first".to_string()))?;

    let role = find_role(role_name)
        .ok_or_else(|| AppError::Validation("Invalid role selected".to_string()))?;

    info!("Adapting resume for role: {}", role.name);
    let prompt = build_adapt_prompt(role, &base.content())?;
    let adapted = generate_document(&state.ai, &prompt, ADAPT_PARSE_FAILURE).await?;

    let job_description = req
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty());
    let adapted_content = Value::Object(adapted.document);
    let version = insert_version(
        &state.db,
        NewVersion {
            resume_base_id: base.id,
            user_id: auth.id,
            role: role.name,
            job_description,
            adapted_content: &adapted_content,
        },
    )
    .await?;

    info!("Resume adapted successfully (version {})", version.id);

    Ok(Json(json!({
        "success": true,
        "message": format!("Resume adapted for {}", role.name),
        "version": version,
        "provider": adapted.provider,
    })))
}

/// POST /api/ai/parse-resume
pub async fn parse_resume(
    State(state): State<AppState>,
    _auth: AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, AppError> {
    // A body that is not multipart carries no file.
    let file = match multipart {
        Ok(multipart) => read_upload(multipart).await?,
        Err(_) => None,
    }
    .ok_or_else(no_file_uploaded)?;
    info!("File uploaded: {} ({} bytes)", file.file_name, file.bytes.len());

    let raw_text = extract_text(&file).await?;
    validate_resume_text(&raw_text)?;
    let extracted_length = raw_text.chars().count();
    info!("Text extracted successfully ({extracted_length} characters)");

    let parsed = generate_document(&state.ai, &build_parse_prompt(&raw_text), UPLOAD_PARSE_FAILURE)
        .await?;
    info!("Resume parsed successfully via {}", parsed.provider);

    Ok(Json(json!({
        "success": true,
        "message": "Resume parsed successfully. Review and save to continue.",
        "resume": parsed.document,
        "metadata": {
            "originalFilename": file.file_name,
            "fileSize": file.bytes.len(),
            "extractedLength": extracted_length,
            "provider": parsed.provider,
        },
    })))
}

/// GET /api/ai/roles
pub async fn list_roles() -> Json<Value> {
    let roles: Vec<Value> = ROLES
        .iter()
        .map(|r| json!({ "name": r.name, "description": r.focus }))
        .collect();
    Json(json!({ "success": true, "roles": roles }))
}

/// GET /api/ai/status
pub async fn ai_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "providers": state.ai.status(),
        "primary": state.ai.primary_provider(),
        "fallback": state.ai.fallback_provider(),
    }))
}

/// First file in the `resume` field. Other fields are drained and ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or(UPLOAD_FIELD).to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(upload_error)?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(file_too_large());
        }
        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}

fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        file_too_large()
    } else {
        AppError::Validation(format!("Invalid upload: {}", err.body_text()))
    }
}

fn no_file_uploaded() -> AppError {
    AppError::Validation("No file uploaded. Please upload a PDF, DOCX, or TXT file.".to_string())
}

fn file_too_large() -> AppError {
    AppError::Validation("File too large. Maximum size is 5MB.".to_string())
}
