//! LandmarkProvider - Hand Landmark Service Adapter
//!
//! ## Responsibilities
//!
//! - Send frames to the external hand-landmark service
//! - Parse zero or more 21-point landmark sets from the response
//!
//! One landmark set is returned per detected hand. A transport or parse
//! fault is surfaced as `Error::Landmark`; the pipeline treats that the
//! same as "no hand detected" for the frame rather than propagating it.

use crate::error::{Error, Result};
use crate::gesture::{Landmark, LandmarkSet};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;

/// Detection response from the landmark service
#[derive(Debug, Clone, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub hands: Vec<DetectedHand>,
}

/// One detected hand
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedHand {
    pub landmarks: Vec<Landmark>,
}

/// Hand landmark service adapter
pub struct LandmarkProvider {
    client: reqwest::Client,
    base_url: String,
}

impl LandmarkProvider {
    /// Create a new LandmarkProvider
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Detect hands in one JPEG frame
    ///
    /// Returns one landmark set per detected hand, in detection order.
    pub async fn detect(&self, frame: Bytes) -> Result<Vec<LandmarkSet>> {
        let url = format!("{}/detect", self.base_url);

        let part = Part::bytes(frame.to_vec())
            .file_name("frame.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| Error::Landmark(e.to_string()))?;
        let form = Form::new().part("image", part);

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Landmark(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Error::Landmark(format!(
                "landmark service returned {}",
                resp.status()
            )));
        }

        let detect: DetectResponse = resp
            .json()
            .await
            .map_err(|e| Error::Landmark(e.to_string()))?;

        Ok(Self::collect_sets(detect))
    }

    /// Check landmark service health
    pub async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/healthz", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Convert response hands into fixed-size landmark sets
    ///
    /// Hands with the wrong point count are dropped with a warning so one
    /// malformed detection never poisons the frame.
    fn collect_sets(detect: DetectResponse) -> Vec<LandmarkSet> {
        let mut sets = Vec::with_capacity(detect.hands.len());

        for hand in detect.hands {
            match <LandmarkSet>::try_from(hand.landmarks.as_slice()) {
                Ok(set) => sets.push(set),
                Err(_) => {
                    tracing::warn!(
                        points = hand.landmarks.len(),
                        "Dropping hand with unexpected landmark count"
                    );
                }
            }
        }

        sets
    }
}
