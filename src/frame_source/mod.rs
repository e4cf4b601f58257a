//! FrameSource - Camera Gateway Adapter
//!
//! ## Responsibilities
//!
//! - Fetch the latest camera frame as JPEG from a go2rtc-style gateway
//! - Health checking of the gateway
//!
//! Camera I/O itself lives behind the gateway; this adapter only speaks
//! HTTP. Any transport failure maps to `Error::CameraUnavailable`, which
//! the pipeline turns into the placeholder path instead of a dead stream.

use crate::error::{Error, Result};
use bytes::Bytes;
use std::time::Duration;

/// Camera gateway adapter
pub struct FrameSource {
    client: reqwest::Client,
    base_url: String,
    camera_name: String,
}

impl FrameSource {
    /// Create a new FrameSource for one camera at the gateway
    pub fn new(base_url: String, camera_name: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            camera_name,
        }
    }

    /// Fetch one JPEG frame from the gateway
    pub async fn capture(&self) -> Result<Bytes> {
        let url = format!(
            "{}/api/frame.jpeg?src={}",
            self.base_url, self.camera_name
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::CameraUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Error::CameraUnavailable(format!(
                "gateway returned {}",
                resp.status()
            )));
        }

        let data = resp
            .bytes()
            .await
            .map_err(|e| Error::CameraUnavailable(e.to_string()))?;

        if data.is_empty() {
            return Err(Error::CameraUnavailable("empty frame body".to_string()));
        }

        tracing::trace!(
            camera = %self.camera_name,
            size = data.len(),
            "Frame captured"
        );

        Ok(data)
    }

    /// Check gateway health
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }
}
