#![forbid(unsafe_code)]

//! Focal point: normalized vertical crop anchor for the hero image.
//!
//! The anchor keeps a detected face visible when the image is cropped to the
//! header's aspect. 0.0 is the top of the image, 1.0 the bottom. With no
//! detected face a fixed default keeps the crop in the upper quarter, which
//! works for most portrait and landscape subjects.
//!
//! Computation is pure and synchronous. It runs only on successful image
//! load, independently of the title-fit pass; neither blocks the other.

use masthead_core::PointF;

/// Focal point used when no face is detected.
pub const DEFAULT_FOCAL_Y: f32 = 0.25;

/// Normalized vertical crop anchor, always in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalPoint {
    /// Normalized vertical position: 0.0 = image top, 1.0 = image bottom.
    pub y: f32,
}

impl FocalPoint {
    /// Clamp a raw anchor into `[0, 1]`.
    fn clamped(raw: f32) -> Self {
        Self {
            y: raw.clamp(0.0, 1.0),
        }
    }
}

impl Default for FocalPoint {
    fn default() -> Self {
        Self { y: DEFAULT_FOCAL_Y }
    }
}

/// Derive the crop anchor from a detected face location.
///
/// With no face (or a degenerate image height) this is the fixed default.
/// Otherwise the anchor is the face's vertical position plus a small nose
/// offset, normalized by the image height and clamped to `[0, 1]` regardless
/// of what the detector reported.
pub fn compute(image_height_px: u32, face: Option<PointF>, nose_offset_px: f32) -> FocalPoint {
    let Some(face) = face else {
        return FocalPoint::default();
    };
    if image_height_px == 0 {
        return FocalPoint::default();
    }
    let height = image_height_px as f32;
    let raw = face.y / height + nose_offset_px / height;
    if raw.is_finite() {
        FocalPoint::clamped(raw)
    } else {
        FocalPoint::default()
    }
}
