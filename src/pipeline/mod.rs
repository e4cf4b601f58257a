//! FramePipeline - Per-Frame Processing Loop
//!
//! ## Responsibilities
//!
//! - Capture frames from the camera gateway
//! - Run landmark detection and gesture classification per frame
//! - Update the shared move cell and publish annotated JPEG frames
//!
//! Every stage returns a tagged `Result`; the loop matches on the failure
//! kind. Camera-unavailable switches to a 1 fps placeholder cadence; any
//! other per-frame fault substitutes one placeholder frame and the loop
//! keeps running. No error in this path terminates the stream.

mod annotate;
mod overlay;
mod placeholder;

pub use annotate::{draw_box, landmark_bbox, PixelBox};
pub use overlay::Overlay;
pub use placeholder::{placeholder_jpeg, PlaceholderKind};

use crate::error::{Error, Result};
use crate::frame_hub::FrameHub;
use crate::frame_source::FrameSource;
use crate::gesture::{self, LandmarkSet, Move};
use crate::landmark_provider::LandmarkProvider;
use crate::move_state::MoveState;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Pause between processed frames (paces gateway polling)
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Placeholder cadence while the camera is unavailable
const DEGRADED_INTERVAL: Duration = Duration::from_secs(1);

/// Move label position and size (top-left, original overlay placement)
const MOVE_LABEL_POS: (i32, i32) = (10, 10);
const MOVE_LABEL_SIZE: f32 = 28.0;
const MOVE_LABEL_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Frame processing loop
pub struct FramePipeline {
    frame_source: Arc<FrameSource>,
    landmark_provider: Arc<LandmarkProvider>,
    move_state: Arc<MoveState>,
    frame_hub: Arc<FrameHub>,
    jpeg_quality: u8,
    mirror: bool,
    overlay: Overlay,
    placeholder_camera: Bytes,
    placeholder_stream: Bytes,
    running: Arc<RwLock<bool>>,
}

impl FramePipeline {
    /// Create a new FramePipeline
    pub fn new(
        frame_source: Arc<FrameSource>,
        landmark_provider: Arc<LandmarkProvider>,
        move_state: Arc<MoveState>,
        frame_hub: Arc<FrameHub>,
        jpeg_quality: u8,
        mirror: bool,
    ) -> Result<Self> {
        let overlay = Overlay::load();
        let placeholder_camera =
            placeholder_jpeg(PlaceholderKind::CameraUnavailable, &overlay, jpeg_quality)?;
        let placeholder_stream =
            placeholder_jpeg(PlaceholderKind::StreamError, &overlay, jpeg_quality)?;

        Ok(Self {
            frame_source,
            landmark_provider,
            move_state,
            frame_hub,
            jpeg_quality,
            mirror,
            overlay,
            placeholder_camera,
            placeholder_stream,
            running: Arc::new(RwLock::new(false)),
        })
    }

    /// Start the frame loop
    pub async fn start(self: Arc<Self>) {
        {
            let mut running = self.running.write().await;
            if *running {
                tracing::warn!("Frame pipeline already running");
                return;
            }
            *running = true;
        }

        tracing::info!("Starting frame pipeline");

        let pipeline = self;
        tokio::spawn(async move {
            loop {
                {
                    let is_running = pipeline.running.read().await;
                    if !*is_running {
                        break;
                    }
                }

                match pipeline.process_frame().await {
                    Ok(frame) => {
                        pipeline.frame_hub.publish(frame);
                        tokio::time::sleep(FRAME_INTERVAL).await;
                    }
                    Err(Error::CameraUnavailable(msg)) => {
                        tracing::warn!(error = %msg, "Camera unavailable, emitting placeholder");
                        pipeline.frame_hub.publish(pipeline.placeholder_camera.clone());
                        tokio::time::sleep(DEGRADED_INTERVAL).await;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Frame processing failed, emitting placeholder");
                        pipeline.frame_hub.publish(pipeline.placeholder_stream.clone());
                        tokio::time::sleep(FRAME_INTERVAL).await;
                    }
                }
            }

            tracing::info!("Frame pipeline stopped");
        });
    }

    /// Stop the frame loop
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
        tracing::info!("Stopping frame pipeline");
    }

    /// Capture, classify and annotate one frame
    async fn process_frame(&self) -> Result<Bytes> {
        let raw = self.frame_source.capture().await?;

        let decoded = image::load_from_memory(&raw)
            .map_err(|e| Error::Decode(e.to_string()))?
            .to_rgb8();
        let mut frame = if self.mirror {
            image::imageops::flip_horizontal(&decoded)
        } else {
            decoded
        };

        // A landmark fault counts as "no hand detected" for this frame
        let hands = match self.landmark_provider.detect(raw).await {
            Ok(hands) => hands,
            Err(e) => {
                tracing::warn!(error = %e, "Landmark detection failed, treating as no hands");
                Vec::new()
            }
        };

        let current = Self::classify_hands(&self.move_state, &hands).await;
        self.annotate(&mut frame, &hands);
        self.overlay.draw_label(
            &mut frame,
            &format!("Move: {}", current),
            MOVE_LABEL_POS.0,
            MOVE_LABEL_POS.1,
            MOVE_LABEL_SIZE,
            MOVE_LABEL_COLOR,
        );

        self.encode(&frame)
    }

    /// Reset the shared move, then classify each hand in order
    ///
    /// With several hands in one frame the last classification wins; this
    /// mirrors the upstream behavior and is pinned by a test. Returns the
    /// move that ends up in the cell, for the frame overlay.
    async fn classify_hands(move_state: &MoveState, hands: &[LandmarkSet]) -> Move {
        let mut current = Move::None;
        move_state.set(current).await;
        for hand in hands {
            current = gesture::classify(hand);
            move_state.set(current).await;
        }
        current
    }

    /// Draw one padded rectangle per detected hand
    ///
    /// The classifier itself is mirror-invariant (absolute x distances and
    /// y comparisons), so only the overlay needs reflecting.
    fn annotate(&self, frame: &mut RgbImage, hands: &[LandmarkSet]) {
        let (w, h) = frame.dimensions();
        for hand in hands {
            let bbox = landmark_bbox(hand, w, h, self.mirror);
            draw_box(frame, &bbox);
        }
    }

    /// Encode the annotated frame to JPEG
    fn encode(&self, frame: &RgbImage) -> Result<Bytes> {
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, self.jpeg_quality)
            .encode_image(frame)
            .map_err(|e| Error::Encode(e.to_string()))?;
        Ok(Bytes::from(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Landmark, Move, INDEX_PIP, PINKY_TIP, RING_TIP, THUMB_TIP};

    fn rock_hand() -> LandmarkSet {
        let mut set = [Landmark::new(0.5, 0.5); 21];
        for (i, lm) in set.iter_mut().enumerate() {
            lm.x = i as f32 * 0.045;
        }
        set[THUMB_TIP].y = 0.2;
        set[INDEX_PIP].y = 0.8;
        set
    }

    fn scissor_hand() -> LandmarkSet {
        let mut set = [Landmark::new(0.5, 0.5); 21];
        for (i, lm) in set.iter_mut().enumerate() {
            lm.x = i as f32 * 0.045;
        }
        set[THUMB_TIP] = Landmark::new(0.50, 0.9);
        set[INDEX_PIP] = Landmark::new(0.3, 0.3);
        set[RING_TIP].x = 0.52;
        set[PINKY_TIP].x = 0.53;
        set
    }

    #[tokio::test]
    async fn zero_hands_resets_move_to_none() {
        let state = MoveState::new();
        state.set(Move::Rock).await;
        FramePipeline::classify_hands(&state, &[]).await;
        assert_eq!(state.get().await, Move::None);
    }

    #[tokio::test]
    async fn single_hand_sets_its_move() {
        let state = MoveState::new();
        let current = FramePipeline::classify_hands(&state, &[rock_hand()]).await;
        assert_eq!(state.get().await, Move::Rock);
        // The returned move (used for the frame overlay) matches the cell
        assert_eq!(current, Move::Rock);
    }

    #[tokio::test]
    async fn multi_hand_frame_is_last_write_wins() {
        // Deliberate: only the last-processed hand's label survives
        let state = MoveState::new();
        FramePipeline::classify_hands(&state, &[rock_hand(), scissor_hand()]).await;
        assert_eq!(state.get().await, Move::Scissor);

        FramePipeline::classify_hands(&state, &[scissor_hand(), rock_hand()]).await;
        assert_eq!(state.get().await, Move::Rock);
    }
}
