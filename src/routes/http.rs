// GET handlers: banner, version, sysinfo snapshot

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::version::{NAME, VERSION, banner};

pub(super) async fn root_handler() -> impl IntoResponse {
    banner()
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/sysinfo — fresh snapshot; 500 with `{"error": ...}` when a mandatory provider fails.
pub(super) async fn sysinfo_handler(State(state): State<AppState>) -> Response {
    match state.aggregator.snapshot().await {
        Ok(snapshot) => axum::Json(snapshot).into_response(),
        Err(e) => {
            tracing::warn!("get_sysinfo failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
