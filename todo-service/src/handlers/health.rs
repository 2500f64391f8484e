use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

pub const BACKEND_OK: &str = "✅ Backend is running correctly!";

/// GET /test. Never touches the store.
pub async fn backend_test() -> &'static str {
    BACKEND_OK
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let service = state.config.common.service_name.clone();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": service,
                "version": env!("CARGO_PKG_VERSION"),
                "store": "up"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": service,
                "store": "down",
                "error": e.to_string()
            })),
        ),
    }
}
