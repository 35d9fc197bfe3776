//! Health check endpoint

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::json;

/// Liveness of this process plus the model server it is pointed at.
/// Reachability of that server is reported by `/api/status`.
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "gptoss-chat",
            "version": env!("CARGO_PKG_VERSION"),
            "model": state.client.model(),
            "model_server": state.config.model_server_url,
        })),
    )
}
