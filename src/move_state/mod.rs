//! MoveState - Shared Move Cell
//!
//! ## Responsibilities
//!
//! - Hold the most recently classified move
//! - Independent read access for the move endpoint
//!
//! Overwritten unconditionally on every processed frame; a reader may see
//! the value from one frame ago, which is acceptable for this use case.

use crate::gesture::Move;
use tokio::sync::RwLock;

/// Process-wide move cell, passed by handle into the pipeline and the
/// query path. Starts at NONE until the first frame completes.
pub struct MoveState {
    current: RwLock<Move>,
}

impl MoveState {
    /// Create a new cell initialized to NONE
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Move::None),
        }
    }

    /// Read the latest move without mutating
    pub async fn get(&self) -> Move {
        *self.current.read().await
    }

    /// Overwrite with the move of the frame just processed
    pub async fn set(&self, mv: Move) {
        let mut current = self.current.write().await;
        if *current != mv {
            tracing::debug!(from = %current, to = %mv, "Move changed");
        }
        *current = mv;
    }
}

impl Default for MoveState {
    fn default() -> Self {
        Self::new()
    }
}
