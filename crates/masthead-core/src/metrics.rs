#![forbid(unsafe_code)]

//! Display metrics: density and height in density-independent units.
//!
//! Metrics are re-derived at the start of every layout pass and never cached
//! across passes. A host that cannot report metrics yields the degenerate
//! result `{ density: 1.0, height_dp: 0 }`, which is valid and simply fails
//! the screen-height gate for image-dependent features.

/// Current display configuration, sampled once per layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayMetrics {
    /// Density scalar (physical pixels per density-independent pixel).
    /// Always finite and > 0.
    pub density: f32,
    /// Display height in density-independent pixels.
    pub height_dp: u32,
}

impl DisplayMetrics {
    /// Build metrics from a raw pixel height and density scalar.
    ///
    /// A non-finite or non-positive density is replaced with 1.0 so that a
    /// misreporting host degrades to the `height_dp: 0`-style gate instead of
    /// poisoning downstream arithmetic.
    pub fn from_raw(density: f32, height_px: f32) -> Self {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            1.0
        };
        let height_dp = if height_px.is_finite() && height_px > 0.0 {
            (height_px / density) as u32
        } else {
            0
        };
        Self { density, height_dp }
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            height_dp: 0,
        }
    }
}

/// Source of the current display configuration.
///
/// Pure query against the host environment; no side effects beyond reading
/// the current display state. There is no error path: hosts that cannot
/// report metrics return the degenerate default.
pub trait DisplayMetricsProvider {
    /// Sample the current display metrics.
    fn refresh(&self) -> DisplayMetrics;

    /// Pixel offset of the content surface's top edge below the display top
    /// (status/action bar chrome). Used for main-page padding.
    fn content_top_offset_px(&self) -> f32 {
        0.0
    }
}

/// A provider with a fixed configuration.
///
/// Suitable for hosts whose display never changes and for deterministic
/// tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMetrics {
    density: f32,
    height_px: f32,
    content_top_offset_px: f32,
}

impl FixedMetrics {
    /// Create a fixed provider from density and display height in pixels.
    pub const fn new(density: f32, height_px: f32) -> Self {
        Self {
            density,
            height_px,
            content_top_offset_px: 0.0,
        }
    }

    /// Set the content top offset reported to the padding computation.
    #[must_use]
    pub const fn with_content_top_offset(mut self, offset_px: f32) -> Self {
        self.content_top_offset_px = offset_px;
        self
    }
}

impl DisplayMetricsProvider for FixedMetrics {
    fn refresh(&self) -> DisplayMetrics {
        DisplayMetrics::from_raw(self.density, self.height_px)
    }

    fn content_top_offset_px(&self) -> f32 {
        self.content_top_offset_px
    }
}
