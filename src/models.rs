//! Shared response models
//!
//! This module contains types shared across multiple modules
//! to avoid circular dependencies.

use crate::gesture::Move;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub camera_connected: bool,
    pub landmark_connected: bool,
}

/// Current move response (`GET /get_move`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub current_move: Move,
}

/// System status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatusResponse {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub stream_clients: usize,
    pub frames_published: u64,
}
