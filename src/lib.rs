//! RPS Camserver Library
//!
//! Rock-paper-scissors gesture classification over a live camera feed.
//!
//! ## Architecture (7 Components)
//!
//! 1. FrameSource - camera gateway adapter (JPEG frames over HTTP)
//! 2. LandmarkProvider - hand landmark service adapter
//! 3. Gesture - geometric move classifier (the core logic)
//! 4. MoveState - shared cell holding the latest move
//! 5. FramePipeline - per-frame capture/classify/annotate loop
//! 6. FrameHub - encoded frame fan-out to stream clients
//! 7. WebAPI - MJPEG feed, move query, health endpoints
//!
//! ## Design Principles
//!
//! - The classifier is pure and evaluated independently per frame
//! - Collaborator faults degrade the stream, never break it
//! - Shared state is explicitly owned and passed by handle

pub mod error;
pub mod frame_hub;
pub mod frame_source;
pub mod gesture;
pub mod landmark_provider;
pub mod models;
pub mod move_state;
pub mod pipeline;
pub mod state;
pub mod web_api;

pub use error::{Error, Result};
pub use state::AppState;
