//! API Routes

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bytes::{Bytes, BytesMut};
use std::convert::Infallible;
use tokio::sync::broadcast;

use crate::models::MoveResponse;
use crate::state::AppState;

/// Multipart boundary for the MJPEG stream
const STREAM_CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health & Status
        .route("/healthz", get(super::health_check))
        .route("/api/status", get(super::device_status))
        .route("/api/system/status", get(super::system_status))
        // Gesture feed
        .route("/video_feed", get(video_feed))
        .route("/get_move", get(get_move))
        .with_state(state)
}

/// Current move as `{"move": "ROCK"}`
///
/// Reads the shared cell without touching the pipeline; before the first
/// processed frame this returns NONE.
async fn get_move(State(state): State<AppState>) -> Json<MoveResponse> {
    let current_move = state.move_state.get().await;
    Json(MoveResponse { current_move })
}

/// Continuous MJPEG stream of annotated frames
async fn video_feed(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!(clients = state.frame_hub.client_count() + 1, "Video feed requested");

    let rx = state.frame_hub.subscribe();
    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(frame) => {
                    return Some((Ok::<Bytes, Infallible>(multipart_part(&frame)), rx));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Slow client: drop the missed frames and continue
                    tracing::debug!(skipped = skipped, "Stream client lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    (
        [
            (header::CONTENT_TYPE, STREAM_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
}

/// Frame one JPEG as a multipart part
fn multipart_part(frame: &[u8]) -> Bytes {
    let mut part = BytesMut::with_capacity(frame.len() + 48);
    part.extend_from_slice(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n");
    part.extend_from_slice(frame);
    part.extend_from_slice(b"\r\n");
    part.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_hub::FrameHub;
    use crate::frame_source::FrameSource;
    use crate::gesture::Move;
    use crate::landmark_provider::LandmarkProvider;
    use crate::move_state::MoveState;
    use crate::pipeline::FramePipeline;
    use crate::state::{AppConfig, SystemHealth};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn test_state() -> AppState {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            camera_gateway_url: "http://127.0.0.1:1".to_string(),
            camera_name: "test".to_string(),
            landmark_url: "http://127.0.0.1:1".to_string(),
            jpeg_quality: 80,
            mirror: true,
        };

        let move_state = Arc::new(MoveState::new());
        let frame_hub = Arc::new(FrameHub::new());
        let frame_source = Arc::new(FrameSource::new(
            config.camera_gateway_url.clone(),
            config.camera_name.clone(),
        ));
        let landmark_provider = Arc::new(LandmarkProvider::new(config.landmark_url.clone()));
        let pipeline = Arc::new(
            FramePipeline::new(
                frame_source.clone(),
                landmark_provider.clone(),
                move_state.clone(),
                frame_hub.clone(),
                config.jpeg_quality,
                config.mirror,
            )
            .unwrap(),
        );

        AppState {
            config,
            move_state,
            frame_hub,
            frame_source,
            landmark_provider,
            pipeline,
            system_health: Arc::new(RwLock::new(SystemHealth::default())),
        }
    }

    #[test]
    fn multipart_part_framing() {
        let part = multipart_part(b"JPEGDATA");
        assert!(part.starts_with(b"--frame\r\nContent-Type: image/jpeg\r\n\r\n"));
        assert!(part.ends_with(b"JPEGDATA\r\n"));
    }

    #[tokio::test]
    async fn get_move_is_none_before_any_frame() {
        let state = test_state();
        let Json(resp) = get_move(State(state)).await;
        assert_eq!(resp.current_move, Move::None);
    }

    #[tokio::test]
    async fn get_move_reflects_latest_classification() {
        let state = test_state();
        state.move_state.set(Move::Paper).await;
        let Json(resp) = get_move(State(state)).await;
        assert_eq!(resp.current_move, Move::Paper);
    }

    #[tokio::test]
    async fn system_status_wraps_payload_in_api_response() {
        let state = test_state();
        state.frame_hub.publish(Bytes::from_static(b"frame"));

        let Json(resp) = crate::web_api::system_status(State(state)).await;
        assert!(resp.ok);
        assert!(resp.error.is_none());
        assert_eq!(resp.data.unwrap().frames_published, 1);
    }
}
