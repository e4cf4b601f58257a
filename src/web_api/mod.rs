//! WebAPI - HTTP Endpoints
//!
//! ## Responsibilities
//!
//! - MJPEG video feed and move query endpoints
//! - Health and system status
//! - Response formatting

mod routes;

pub use routes::create_router;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::models::{ApiResponse, HealthResponse, SystemStatusResponse};
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let camera_ok = state.frame_source.health_check().await.unwrap_or(false);
    let landmark_ok = state.landmark_provider.health_check().await.unwrap_or(false);

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        camera_connected: camera_ok,
        landmark_connected: landmark_ok,
    };

    Json(response)
}

/// Status endpoint
pub async fn device_status(State(_state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "device_type": "rps-camserver",
        "firmware_version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// System status endpoint (CPU/memory plus stream counters)
pub async fn system_status(
    State(state): State<AppState>,
) -> Json<ApiResponse<SystemStatusResponse>> {
    let health = state.system_health.read().await;

    Json(ApiResponse::success(SystemStatusResponse {
        cpu_percent: health.cpu_percent,
        memory_percent: health.memory_percent,
        stream_clients: state.frame_hub.client_count(),
        frames_published: state.frame_hub.frames_published(),
    }))
}
