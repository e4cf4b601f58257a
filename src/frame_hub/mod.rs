//! FrameHub - Encoded Frame Fan-out
//!
//! ## Responsibilities
//!
//! - Broadcast encoded JPEG frames from the pipeline to stream clients
//! - Track client and frame counts
//!
//! Built on a broadcast channel: a lagging client skips frames instead of
//! back-pressuring the pipeline. Staleness of a frame is acceptable here.

use bytes::Bytes;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Frames buffered per client before lagging kicks in
const CHANNEL_CAPACITY: usize = 4;

/// FrameHub instance
pub struct FrameHub {
    tx: broadcast::Sender<Bytes>,
    frames_published: AtomicU64,
}

impl FrameHub {
    /// Create new FrameHub
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            frames_published: AtomicU64::new(0),
        }
    }

    /// Publish one encoded JPEG frame to all clients
    pub fn publish(&self, frame: Bytes) {
        self.frames_published.fetch_add(1, Ordering::Relaxed);
        // Send fails only when no client is subscribed, which is fine
        let _ = self.tx.send(frame);
    }

    /// Subscribe a new stream client
    pub fn subscribe(&self) -> broadcast::Receiver<Bytes> {
        self.tx.subscribe()
    }

    /// Number of connected stream clients
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Total frames published since start
    pub fn frames_published(&self) -> u64 {
        self.frames_published.load(Ordering::Relaxed)
    }
}

impl Default for FrameHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_published_frame() {
        let hub = FrameHub::new();
        let mut rx = hub.subscribe();
        hub.publish(Bytes::from_static(b"\xff\xd8jpeg"));
        let frame = rx.recv().await.unwrap();
        assert_eq!(&frame[..2], b"\xff\xd8");
        assert_eq!(hub.frames_published(), 1);
    }

    #[tokio::test]
    async fn publish_without_clients_does_not_error() {
        let hub = FrameHub::new();
        hub.publish(Bytes::from_static(b"frame"));
        assert_eq!(hub.client_count(), 0);
        assert_eq!(hub.frames_published(), 1);
    }
}
