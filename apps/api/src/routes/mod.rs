pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::adaptation::handlers as ai;
use crate::auth::handlers as auth;
use crate::extraction::MAX_UPLOAD_BYTES;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers on top of the file cap.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // Base résumé and versions
        .route("/api/resume/base", post(resume::save_base).get(resume::get_base))
        .route("/api/resume/versions", get(resume::get_versions))
        .route(
            "/api/resume/versions/:id",
            get(resume::get_version).delete(resume::remove_version),
        )
        .route("/api/resume/stats", get(resume::get_stats))
        .route("/api/resume/pdf/:id", get(resume::download_pdf))
        // AI
        .route("/api/ai/roles", get(ai::list_roles))
        .route("/api/ai/status", get(ai::ai_status))
        .route("/api/ai/adapt", post(ai::adapt_resume))
        .route(
            "/api/ai/parse-resume",
            post(ai::parse_resume)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .fallback(route_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, Response};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::ai_client::testing::ScriptedProvider;
    use crate::ai_client::{AiClient, TextProvider};
    use crate::state::test_support::test_state;

    const BOUNDARY: &str = "cvmorph-test-boundary";

    fn app_with(provider: Option<Arc<ScriptedProvider>>) -> (Router, String) {
        let ai = AiClient::new(provider.map(|p| p as Arc<dyn TextProvider>), None);
        let state = test_state(ai);
        let token = state
            .jwt
            .issue(Uuid::new_v4(), "ada@example.com")
            .unwrap();
        (build_router(state), token)
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(token: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/ai/parse-resume")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn resume_text() -> String {
        "Ada Lovelace\nada@example.com\n\nExperience\nSoftware Engineer at Analytical Engines, \
         2021 - Present. Built a job queue handling two million tasks per day."
            .to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with(None);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "CVMorph API is running");
        assert_eq!(body["env"], "test");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_envelope() {
        let (app, _) = app_with(None);
        let response = app
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Route not found" })
        );
    }

    #[tokio::test]
    async fn test_roles_are_public() {
        let (app, _) = app_with(None);
        let response = app
            .oneshot(Request::builder().uri("/api/ai/roles").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let roles = body["roles"].as_array().unwrap();
        assert_eq!(roles.len(), 6);
        assert_eq!(roles[0]["name"], "Frontend Developer");
        assert!(roles[0]["description"].as_str().unwrap().contains("React"));
        assert!(roles[0].get("keywords").is_none());
    }

    #[tokio::test]
    async fn test_status_reports_configured_providers() {
        let (app, _) = app_with(Some(ScriptedProvider::replying("Gemini", "{}")));
        let response = app
            .oneshot(Request::builder().uri("/api/ai/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["primary"], "Gemini");
        assert_eq!(body["fallback"], "None");
        assert_eq!(body["providers"]["gemini"]["configured"], true);
        assert_eq!(body["providers"]["groq"]["configured"], false);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        for (method, uri) in [
            ("GET", "/api/auth/me"),
            ("GET", "/api/resume/base"),
            ("GET", "/api/resume/versions"),
            ("GET", "/api/resume/stats"),
            ("GET", "/api/resume/pdf/00000000-0000-0000-0000-000000000000"),
            ("POST", "/api/ai/adapt"),
        ] {
            let (app, _) = app_with(None);
            let response = app
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(
                body_json(response).await["message"],
                "Not authorized, token missing or invalid"
            );
        }
    }

    #[tokio::test]
    async fn test_adapt_without_role_is_400() {
        let provider = ScriptedProvider::replying("Gemini", "{}");
        let (app, token) = app_with(Some(provider.clone()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/adapt")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"role": "  ", "jobDescription": "x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Role is required");
        assert_eq!(provider.calls(), 0);
    }

    fn adapt_request(token: &str, content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri("/api/ai/adapt")
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        request.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_adapt_without_body_reports_missing_role_as_envelope() {
        let (app, token) = app_with(None);
        let response = app.oneshot(adapt_request(&token, None, "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Role is required" })
        );
    }

    #[tokio::test]
    async fn test_adapt_with_malformed_json_is_400_envelope() {
        let (app, token) = app_with(None);
        let response = app
            .oneshot(adapt_request(&token, Some("application/json"), "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON body:"));
    }

    #[tokio::test]
    async fn test_login_without_body_is_400_envelope() {
        let (app, _) = app_with(None);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Please provide email and password" })
        );
    }

    #[tokio::test]
    async fn test_parse_resume_with_json_body_reports_no_file() {
        let (app, token) = app_with(Some(ScriptedProvider::replying("Gemini", "{}")));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/ai/parse-resume")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "success": false,
                "message": "No file uploaded. Please upload a PDF, DOCX, or TXT file."
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_version_id_is_404() {
        let (app, token) = app_with(None);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/resume/versions/not-a-uuid")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Resume version not found");
    }

    #[tokio::test]
    async fn test_parse_resume_returns_document_and_metadata() {
        let provider = ScriptedProvider::replying(
            "Gemini",
            "```json\n{\"personal_info\": {\"name\": \"Ada Lovelace\"}, \"skills\": {\"languages\": [\"Rust\"]}}\n```",
        );
        let (app, token) = app_with(Some(provider.clone()));
        let text = resume_text();

        let response = app
            .oneshot(upload_request(
                &token,
                multipart("resume", "ada.txt", "text/plain", text.as_bytes()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["message"],
            "Resume parsed successfully. Review and save to continue."
        );
        assert_eq!(body["resume"]["personal_info"]["name"], "Ada Lovelace");
        assert_eq!(body["metadata"]["originalFilename"], "ada.txt");
        assert_eq!(body["metadata"]["fileSize"], text.len());
        assert_eq!(body["metadata"]["extractedLength"], text.chars().count());
        assert_eq!(body["metadata"]["provider"], "Gemini");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_parse_resume_without_file_is_400() {
        let (app, token) = app_with(Some(ScriptedProvider::replying("Gemini", "{}")));
        let response = app
            .oneshot(upload_request(
                &token,
                multipart("attachment", "ada.txt", "text/plain", b"hello"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "No file uploaded. Please upload a PDF, DOCX, or TXT file."
        );
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_short_text_before_calling_ai() {
        let provider = ScriptedProvider::replying("Gemini", "{}");
        let (app, token) = app_with(Some(provider.clone()));
        let response = app
            .oneshot(upload_request(
                &token,
                multipart("resume", "ada.txt", "text/plain", b"Ada Lovelace"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "Resume content too short. Please upload a complete resume."
        );
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_unsupported_type() {
        let (app, token) = app_with(Some(ScriptedProvider::replying("Gemini", "{}")));
        let response = app
            .oneshot(upload_request(
                &token,
                multipart("resume", "ada.png", "image/png", b"\x89PNG"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = body_json(response).await["message"].as_str().unwrap().to_string();
        assert!(message.contains("Unsupported file type"));
    }

    #[tokio::test]
    async fn test_parse_resume_malformed_ai_output_is_500_with_debug() {
        let provider = ScriptedProvider::replying("Gemini", "Sorry, {\"personal_info\": {");
        let (app, token) = app_with(Some(provider.clone()));
        let response = app
            .oneshot(upload_request(
                &token,
                multipart("resume", "ada.txt", "text/plain", resume_text().as_bytes()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            "AI returned incomplete data. Try uploading a simpler resume or use the manual form."
        );
        assert!(body["debug"].is_string());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_parse_resume_without_providers_is_500() {
        let (app, token) = app_with(None);
        let response = app
            .oneshot(upload_request(
                &token,
                multipart("resume", "ada.txt", "text/plain", resume_text().as_bytes()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["message"],
            "No AI providers available. Please configure GEMINI_API_KEY or GROQ_API_KEY."
        );
    }
}
