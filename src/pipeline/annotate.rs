//! Frame annotation helpers

use crate::gesture::LandmarkSet;
use image::{Rgb, RgbImage};

/// Pixels added around a hand's landmark extent
const BOX_PADDING: u32 = 20;

/// Overlay rectangle thickness
const BOX_THICKNESS: u32 = 2;

/// Overlay color (green)
const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Axis-aligned pixel rectangle, inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

/// Compute the padded pixel bounding box of one hand
///
/// Landmarks are normalized; `mirror` reflects the box horizontally to match
/// a mirrored frame (the detector saw the unmirrored image).
pub fn landmark_bbox(set: &LandmarkSet, width: u32, height: u32, mirror: bool) -> PixelBox {
    let mut x_min = f32::MAX;
    let mut y_min = f32::MAX;
    let mut x_max = f32::MIN;
    let mut y_max = f32::MIN;

    for lm in set {
        let x = if mirror { 1.0 - lm.x } else { lm.x };
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(lm.y);
        y_max = y_max.max(lm.y);
    }

    let to_px = |v: f32, scale: u32| -> u32 {
        (v.clamp(0.0, 1.0) * scale as f32) as u32
    };

    PixelBox {
        x_min: to_px(x_min, width).saturating_sub(BOX_PADDING),
        y_min: to_px(y_min, height).saturating_sub(BOX_PADDING),
        x_max: (to_px(x_max, width) + BOX_PADDING).min(width.saturating_sub(1)),
        y_max: (to_px(y_max, height) + BOX_PADDING).min(height.saturating_sub(1)),
    }
}

/// Draw a hand rectangle onto the frame
pub fn draw_box(img: &mut RgbImage, b: &PixelBox) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || b.x_min > b.x_max || b.y_min > b.y_max {
        return;
    }

    for t in 0..BOX_THICKNESS {
        let top = (b.y_min + t).min(h - 1);
        let bottom = b.y_max.saturating_sub(t).min(h - 1);
        for x in b.x_min..=b.x_max.min(w - 1) {
            img.put_pixel(x, top, BOX_COLOR);
            img.put_pixel(x, bottom, BOX_COLOR);
        }

        let left = (b.x_min + t).min(w - 1);
        let right = b.x_max.saturating_sub(t).min(w - 1);
        for y in b.y_min..=b.y_max.min(h - 1) {
            img.put_pixel(left, y, BOX_COLOR);
            img.put_pixel(right, y, BOX_COLOR);
        }
    }
}
