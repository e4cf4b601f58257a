//! Diagnostic placeholder frames
//!
//! Emitted when the camera is unavailable or a frame fails mid-pipeline,
//! so the stream always carries a valid JPEG. Each degraded cause gets its
//! own caption and band color so the frames are tellable apart even when
//! no overlay font is available.

use crate::error::{Error, Result};
use crate::pipeline::overlay::Overlay;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

pub const PLACEHOLDER_WIDTH: u32 = 640;
pub const PLACEHOLDER_HEIGHT: u32 = 480;

const FIELD: Rgb<u8> = Rgb([24, 24, 24]);
const BORDER: Rgb<u8> = Rgb([200, 200, 200]);
const CAPTION_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const CAPTION_SIZE: f32 = 32.0;

/// Which degraded cause the placeholder reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Camera gateway unreachable or returned no frame
    CameraUnavailable,
    /// Decode/annotate/encode fault inside the frame pipeline
    StreamError,
}

impl PlaceholderKind {
    /// Caption drawn across the center band
    pub fn caption(&self) -> &'static str {
        match self {
            PlaceholderKind::CameraUnavailable => "Camera Not Available",
            PlaceholderKind::StreamError => "Stream Error",
        }
    }

    /// Band color, distinct per cause
    fn band(&self) -> Rgb<u8> {
        match self {
            PlaceholderKind::CameraUnavailable => Rgb([96, 96, 96]),
            PlaceholderKind::StreamError => Rgb([140, 40, 40]),
        }
    }
}

/// Render and encode one placeholder
///
/// Dark field, light border, colored center band with the cause caption:
/// visibly not camera output.
pub fn placeholder_jpeg(kind: PlaceholderKind, overlay: &Overlay, quality: u8) -> Result<Bytes> {
    let mut img = RgbImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, FIELD);
    let band = kind.band();

    for y in 0..PLACEHOLDER_HEIGHT {
        for x in 0..PLACEHOLDER_WIDTH {
            let on_border = x < 8
                || y < 8
                || x >= PLACEHOLDER_WIDTH - 8
                || y >= PLACEHOLDER_HEIGHT - 8;
            let on_band = (PLACEHOLDER_HEIGHT / 2 - 24..PLACEHOLDER_HEIGHT / 2 + 24).contains(&y);

            if on_border {
                img.put_pixel(x, y, BORDER);
            } else if on_band {
                img.put_pixel(x, y, band);
            }
        }
    }

    let caption = kind.caption();
    // Rough centering; the glyph advance averages near half the pixel size
    let x = (PLACEHOLDER_WIDTH as i32 - caption.len() as i32 * (CAPTION_SIZE as i32 / 2)) / 2;
    let y = PLACEHOLDER_HEIGHT as i32 / 2 - CAPTION_SIZE as i32 / 2;
    overlay.draw_label(&mut img, caption, x.max(8), y, CAPTION_SIZE, CAPTION_COLOR);

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&img)
        .map_err(|e| Error::Encode(e.to_string()))?;

    Ok(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_a_valid_jpeg_at_expected_size() {
        let overlay = Overlay::disabled();
        let jpeg = placeholder_jpeg(PlaceholderKind::CameraUnavailable, &overlay, 80).unwrap();
        assert_eq!(&jpeg[..2], &[0xff, 0xd8]);

        let img = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(img.width(), PLACEHOLDER_WIDTH);
        assert_eq!(img.height(), PLACEHOLDER_HEIGHT);
    }

    #[test]
    fn each_cause_is_visually_distinct() {
        let overlay = Overlay::disabled();
        let camera = placeholder_jpeg(PlaceholderKind::CameraUnavailable, &overlay, 80).unwrap();
        let stream = placeholder_jpeg(PlaceholderKind::StreamError, &overlay, 80).unwrap();

        let camera = image::load_from_memory(&camera).unwrap().to_rgb8();
        let stream = image::load_from_memory(&stream).unwrap().to_rgb8();

        // Probe the center band away from any caption glyphs. The camera
        // band is neutral gray, the stream band leans red; JPEG loss keeps
        // the channel relation intact.
        let c = camera.get_pixel(20, PLACEHOLDER_HEIGHT / 2);
        let s = stream.get_pixel(20, PLACEHOLDER_HEIGHT / 2);
        assert!(c[0].abs_diff(c[1]) < 20, "camera band should be neutral");
        assert!(s[0] > s[1] + 40, "stream band should lean red");
    }

    #[test]
    fn captions_name_the_cause() {
        assert_eq!(
            PlaceholderKind::CameraUnavailable.caption(),
            "Camera Not Available"
        );
        assert_eq!(PlaceholderKind::StreamError.caption(), "Stream Error");
    }
}
