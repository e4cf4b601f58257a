//! Gesture Classifier - Hand Landmark Geometry
//!
//! ## Responsibilities
//!
//! - Map a 21-point hand landmark set to a discrete move
//! - Pure per-frame evaluation, no smoothing across frames
//!
//! The classifier is a fixed-priority chain of three geometric predicates
//! (ROCK, SCISSOR, PAPER); the first one that holds wins, otherwise NONE.
//! Coordinates are normalized image coordinates with y increasing downward.

use serde::{Deserialize, Serialize};

/// Horizontal-closeness tolerance for SCISSOR, reused as the thumb-offset
/// bound in PAPER (normalized-coordinate units)
pub const MARGIN_S: f32 = 0.075;

/// Vertical-alignment tolerance for PAPER
pub const MARGIN_P: f32 = 0.1;

// MediaPipe hand landmark numbering (wrist=0 .. pinky tip=20).
// Only the points the predicates reference are named.
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const MIDDLE_PIP: usize = 10;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// A single normalized 2D hand landmark
///
/// Nominally in [0,1]; detectors may overshoot slightly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One complete set of 21 landmarks for a detected hand
///
/// The fixed-size array makes a short set unrepresentable, so the classifier
/// never has to check cardinality.
pub type LandmarkSet = [Landmark; 21];

/// Classifier output for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Move {
    Rock,
    Scissor,
    Paper,
    #[default]
    None,
}

impl Move {
    /// String form used by the move endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Rock => "ROCK",
            Move::Scissor => "SCISSOR",
            Move::Paper => "PAPER",
            Move::None => "NONE",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one landmark set
///
/// Priority order is fixed: ROCK, then SCISSOR, then PAPER. A configuration
/// satisfying more than one predicate returns the first match. If none holds
/// the result is NONE; there is no closest-match fallback.
pub fn classify(hl: &LandmarkSet) -> Move {
    if is_rock(hl) {
        return Move::Rock;
    }
    if is_scissor(hl) {
        return Move::Scissor;
    }
    if is_paper(hl) {
        return Move::Paper;
    }
    Move::None
}

/// ROCK: thumb tip above the index PIP joint (closed fist, thumb tucked).
/// Strict comparison, no margin.
fn is_rock(hl: &LandmarkSet) -> bool {
    hl[INDEX_PIP].y > hl[THUMB_TIP].y
}

/// SCISSOR: thumb tip, ring tip and pinky tip mutually close along x only
/// (three fingers folded together, two extended).
fn is_scissor(hl: &LandmarkSet) -> bool {
    (hl[THUMB_TIP].x - hl[RING_TIP].x).abs() < MARGIN_S
        && (hl[THUMB_TIP].x - hl[PINKY_TIP].x).abs() < MARGIN_S
        && (hl[RING_TIP].x - hl[PINKY_TIP].x).abs() < MARGIN_S
}

/// PAPER: four finger reference joints aligned in y, thumb extended to the
/// side (its y strictly between the index MCP and index PIP offsets).
fn is_paper(hl: &LandmarkSet) -> bool {
    let aligned = (hl[INDEX_PIP].y - hl[MIDDLE_PIP].y).abs() < MARGIN_P
        && (hl[INDEX_PIP].y - hl[RING_PIP].y).abs() < MARGIN_P
        && (hl[INDEX_PIP].y - hl[PINKY_DIP].y).abs() < MARGIN_P
        && (hl[MIDDLE_PIP].y - hl[RING_PIP].y).abs() < MARGIN_P
        && (hl[MIDDLE_PIP].y - hl[PINKY_DIP].y).abs() < MARGIN_P
        && (hl[RING_PIP].y - hl[PINKY_DIP].y).abs() < MARGIN_P;

    aligned
        && hl[THUMB_TIP].y < hl[INDEX_MCP].y + MARGIN_S
        && hl[THUMB_TIP].y > hl[INDEX_PIP].y + MARGIN_S
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Base set where no predicate holds: fingertips spread wide in x,
    /// joints spread in y, thumb tip below the index PIP.
    fn neutral_set() -> LandmarkSet {
        let mut hl = [Landmark::default(); 21];
        for (i, lm) in hl.iter_mut().enumerate() {
            lm.x = i as f32 * 0.045;
            lm.y = 0.5;
        }
        // Defeat ROCK: thumb tip below index PIP
        hl[THUMB_TIP].y = 0.9;
        hl[INDEX_PIP].y = 0.3;
        // Defeat PAPER: joints far apart in y
        hl[MIDDLE_PIP].y = 0.6;
        hl[RING_PIP].y = 0.8;
        hl[PINKY_DIP].y = 0.1;
        hl
    }

    #[test]
    fn rock_when_thumb_tip_above_index_pip() {
        let mut hl = neutral_set();
        hl[THUMB_TIP].y = 0.3;
        hl[INDEX_PIP].y = 0.9;
        assert_eq!(classify(&hl), Move::Rock);
    }

    #[test]
    fn rock_from_synthetic_coordinates() {
        // y grows downward: thumb tip at 0.3 sits above the index PIP at 0.9
        let mut hl = neutral_set();
        hl[THUMB_TIP] = Landmark::new(0.2, 0.3);
        hl[INDEX_PIP] = Landmark::new(0.3, 0.9);
        assert_eq!(classify(&hl), Move::Rock);
    }

    #[test]
    fn rock_ignores_other_coordinates() {
        // ROCK holds regardless of what the rest of the hand does
        let mut hl = neutral_set();
        hl[THUMB_TIP].y = 0.1;
        hl[INDEX_PIP].y = 0.2;
        // Also satisfy the SCISSOR x-closeness
        hl[THUMB_TIP].x = 0.50;
        hl[RING_TIP].x = 0.52;
        hl[PINKY_TIP].x = 0.53;
        assert_eq!(classify(&hl), Move::Rock);
    }

    #[test]
    fn scissor_when_three_tips_close_in_x() {
        let mut hl = neutral_set();
        hl[THUMB_TIP].x = 0.50;
        hl[RING_TIP].x = 0.52;
        hl[PINKY_TIP].x = 0.53;
        assert_eq!(classify(&hl), Move::Scissor);
    }

    #[test]
    fn scissor_rejected_when_one_pair_exceeds_margin() {
        let mut hl = neutral_set();
        hl[THUMB_TIP].x = 0.50;
        hl[RING_TIP].x = 0.52;
        hl[PINKY_TIP].x = 0.60; // 0.10 from thumb, over margin
        assert_eq!(classify(&hl), Move::None);
    }

    #[test]
    fn paper_when_joints_aligned_and_thumb_to_the_side() {
        let mut hl = neutral_set();
        hl[INDEX_PIP].y = 0.50;
        hl[MIDDLE_PIP].y = 0.52;
        hl[RING_PIP].y = 0.54;
        hl[PINKY_DIP].y = 0.56;
        hl[INDEX_MCP].y = 0.70;
        // Thumb between index PIP + margin and index MCP + margin
        hl[THUMB_TIP].y = 0.60;
        assert_eq!(classify(&hl), Move::Paper);
    }

    #[test]
    fn paper_rejected_when_thumb_tucked() {
        let mut hl = neutral_set();
        hl[INDEX_PIP].y = 0.50;
        hl[MIDDLE_PIP].y = 0.52;
        hl[RING_PIP].y = 0.54;
        hl[PINKY_DIP].y = 0.56;
        hl[INDEX_MCP].y = 0.70;
        // Thumb at the PIP line: fails the strict lower bound
        hl[THUMB_TIP].y = 0.50;
        assert_eq!(classify(&hl), Move::None);
    }

    #[test]
    fn none_when_no_predicate_holds() {
        assert_eq!(classify(&neutral_set()), Move::None);
    }

    #[test]
    fn boundary_equality_is_not_rock() {
        let mut hl = neutral_set();
        hl[THUMB_TIP].y = 0.5;
        hl[INDEX_PIP].y = 0.5;
        assert_ne!(classify(&hl), Move::Rock);
    }

    #[test]
    fn move_string_forms() {
        assert_eq!(Move::Rock.as_str(), "ROCK");
        assert_eq!(Move::Scissor.as_str(), "SCISSOR");
        assert_eq!(Move::Paper.as_str(), "PAPER");
        assert_eq!(Move::None.as_str(), "NONE");
        assert_eq!(Move::default(), Move::None);
    }

    #[test]
    fn move_serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&Move::Rock).unwrap(), "\"ROCK\"");
        assert_eq!(serde_json::to_string(&Move::None).unwrap(), "\"NONE\"");
    }
}
