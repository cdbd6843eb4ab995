#![forbid(unsafe_code)]

//! Geometric and color primitives.

/// A point in pixel coordinates (origin at top-left, y grows downward).
///
/// Used for detected face locations within a decoded hero image and for
/// click coordinates on the content surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
}

impl PointF {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 24-bit RGB color.
///
/// Carried with image-load outcomes as the image's dominant color and applied
/// to the header's menu bar tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_new_stores_components() {
        let p = PointF::new(3.5, -2.0);
        assert_eq!(p.x, 3.5);
        assert_eq!(p.y, -2.0);
    }

    #[test]
    fn rgb_default_is_black() {
        assert_eq!(Rgb::default(), Rgb::new(0, 0, 0));
    }
}
