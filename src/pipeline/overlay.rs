//! Text overlay support
//!
//! Renders the move label and placeholder captions onto frames. The font is
//! loaded once at startup from `FONT_PATH` or a set of common system
//! locations; without a font the overlay degrades to a no-op so a missing
//! font never stops the stream.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::path::{Path, PathBuf};

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
];

/// Frame text renderer
pub struct Overlay {
    font: Option<FontVec>,
}

impl Overlay {
    /// Load the overlay font from `FONT_PATH` or the candidate list
    pub fn load() -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Ok(path) = std::env::var("FONT_PATH") {
            candidates.push(PathBuf::from(path));
        }
        candidates.extend(FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in &candidates {
            if let Some(font) = Self::load_font(path) {
                tracing::debug!(path = %path.display(), "Overlay font loaded");
                return Self { font: Some(font) };
            }
        }

        tracing::warn!("No overlay font found, frames will carry no text");
        Self { font: None }
    }

    /// Overlay that never draws (used when no font is wanted)
    pub fn disabled() -> Self {
        Self { font: None }
    }

    fn load_font(path: &Path) -> Option<FontVec> {
        let bytes = std::fs::read(path).ok()?;
        FontVec::try_from_vec(bytes).ok()
    }

    /// Whether a font is available
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Draw a text label; without a font this is a no-op
    pub fn draw_label(
        &self,
        img: &mut RgbImage,
        text: &str,
        x: i32,
        y: i32,
        size: f32,
        color: Rgb<u8>,
    ) {
        if let Some(font) = &self.font {
            draw_text_mut(img, color, x, y, PxScale::from(size), font, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_path_falls_back_without_panicking() {
        assert!(Overlay::load_font(Path::new("/nonexistent/font.ttf")).is_none());
    }

    #[test]
    fn draw_label_without_font_leaves_frame_untouched() {
        let overlay = Overlay::disabled();
        let mut img = RgbImage::new(64, 64);
        let before = img.clone();
        overlay.draw_label(&mut img, "Move: ROCK", 10, 10, 28.0, Rgb([0, 255, 0]));
        assert_eq!(img, before);
    }
}
