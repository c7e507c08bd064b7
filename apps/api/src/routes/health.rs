use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "CVMorph API is running",
        "timestamp": Utc::now().to_rfc3339(),
        "env": state.config.app_env,
    }))
}
