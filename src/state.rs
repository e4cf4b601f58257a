//! Application state
//!
//! Holds all shared components and state

use crate::frame_hub::FrameHub;
use crate::frame_source::FrameSource;
use crate::landmark_provider::LandmarkProvider;
use crate::move_state::MoveState;
use crate::pipeline::FramePipeline;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Camera gateway base URL (go2rtc style frame endpoint)
    pub camera_gateway_url: String,
    /// Camera source name at the gateway
    pub camera_name: String,
    /// Hand landmark service base URL
    pub landmark_url: String,
    /// JPEG quality for the outgoing stream (1-100)
    pub jpeg_quality: u8,
    /// Mirror frames horizontally (selfie view)
    pub mirror: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            camera_gateway_url: std::env::var("CAMERA_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:1984".to_string()),
            camera_name: std::env::var("CAMERA_NAME").unwrap_or_else(|_| "webcam".to_string()),
            landmark_url: std::env::var("LANDMARK_URL")
                .unwrap_or_else(|_| "http://localhost:9100".to_string()),
            jpeg_quality: std::env::var("JPEG_QUALITY")
                .ok()
                .and_then(|q| q.parse().ok())
                .unwrap_or(80),
            mirror: std::env::var("MIRROR")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Shared move cell (latest classification)
    pub move_state: Arc<MoveState>,
    /// Encoded frame fan-out for stream clients
    pub frame_hub: Arc<FrameHub>,
    /// Camera gateway adapter
    pub frame_source: Arc<FrameSource>,
    /// Hand landmark service adapter
    pub landmark_provider: Arc<LandmarkProvider>,
    /// Frame processing loop
    pub pipeline: Arc<FramePipeline>,
    /// System health status
    pub system_health: Arc<RwLock<SystemHealth>>,
}

/// System health metrics
#[derive(Debug, Clone, Default)]
pub struct SystemHealth {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub overloaded: bool,
    pub last_overload_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SystemHealth {
    /// Check and update overload status
    pub fn update(&mut self, cpu: f32, memory: f32) {
        self.cpu_percent = cpu;
        self.memory_percent = memory;

        if cpu > 85.0 || memory > 90.0 {
            self.overloaded = true;
            self.last_overload_at = Some(chrono::Utc::now());
        } else if self.overloaded {
            // Recovery with hysteresis
            if let Some(last) = self.last_overload_at {
                let elapsed = chrono::Utc::now() - last;
                if elapsed > chrono::Duration::seconds(60) && cpu < 60.0 && memory < 70.0 {
                    self.overloaded = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overload_triggers_above_cpu_threshold() {
        let mut health = SystemHealth::default();
        health.update(90.0, 50.0);
        assert!(health.overloaded);
        // Immediate recovery is suppressed by hysteresis
        health.update(10.0, 10.0);
        assert!(health.overloaded);
    }
}
