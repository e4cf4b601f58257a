//! RPS Camserver
//!
//! Main entry point for the gesture server.

use rps_camserver::{
    frame_hub::FrameHub,
    frame_source::FrameSource,
    landmark_provider::LandmarkProvider,
    move_state::MoveState,
    pipeline::FramePipeline,
    state::{AppConfig, AppState, SystemHealth},
    web_api,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rps_camserver=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RPS Camserver v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::default();
    tracing::info!(
        camera_gateway_url = %config.camera_gateway_url,
        camera_name = %config.camera_name,
        landmark_url = %config.landmark_url,
        jpeg_quality = config.jpeg_quality,
        mirror = config.mirror,
        "Configuration loaded"
    );

    // Initialize components
    let move_state = Arc::new(MoveState::new());
    let frame_hub = Arc::new(FrameHub::new());
    let frame_source = Arc::new(FrameSource::new(
        config.camera_gateway_url.clone(),
        config.camera_name.clone(),
    ));
    let landmark_provider = Arc::new(LandmarkProvider::new(config.landmark_url.clone()));

    let pipeline = Arc::new(FramePipeline::new(
        frame_source.clone(),
        landmark_provider.clone(),
        move_state.clone(),
        frame_hub.clone(),
        config.jpeg_quality,
        config.mirror,
    )?);
    tracing::info!("Frame pipeline initialized");

    let system_health = Arc::new(RwLock::new(SystemHealth::default()));

    // Create application state
    let state = AppState {
        config,
        move_state,
        frame_hub,
        frame_source,
        landmark_provider,
        pipeline: pipeline.clone(),
        system_health: system_health.clone(),
    };

    // Create router
    let app = web_api::create_router(state.clone())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start frame pipeline
    pipeline.clone().start().await;
    tracing::info!("Frame pipeline started");

    // Start system health monitoring
    let health_monitor = system_health.clone();
    tokio::spawn(async move {
        use sysinfo::System;
        let mut sys = System::new_all();
        let mut interval = tokio::time::interval(Duration::from_secs(30));

        loop {
            interval.tick().await;
            sys.refresh_all();

            let cpu = {
                let cpus = sys.cpus();
                if cpus.is_empty() {
                    0.0
                } else {
                    cpus.iter().map(|c| c.cpu_usage()).sum::<f32>() / cpus.len() as f32
                }
            };
            let memory = if sys.total_memory() > 0 {
                (sys.used_memory() as f32 / sys.total_memory() as f32) * 100.0
            } else {
                0.0
            };

            let mut health = health_monitor.write().await;
            health.update(cpu, memory);
        }
    });

    // Start server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
