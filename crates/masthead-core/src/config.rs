#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! Everything the original behavior read from ambient application state
//! (image-download flag, network protocol, dimension resources) is an
//! explicit field here, so the same logic runs under test with arbitrary
//! configurations.

use std::time::Duration;

/// Minimum screen height for enabling the hero image, in dp. Smaller screens
/// get a text-only header.
pub const MIN_SCREEN_HEIGHT_DP: u32 = 480;

/// Maximum height of the title text, in dp. Text overflowing this height has
/// its font size reduced until it fits.
pub const TITLE_MAX_HEIGHT_DP: u32 = 256;

/// Floor for title font size reduction, in sp.
pub const TITLE_MIN_SIZE_SP: u32 = 12;

/// Step by which the title font size is reduced, in sp.
pub const TITLE_STEP_SP: u32 = 4;

/// Delay before re-checking a title view that is not yet measurable.
pub const REMEASURE_DELAY: Duration = Duration::from_millis(50);

/// Configuration for the masthead layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Whether image downloads are enabled at all. When false the header
    /// always degrades to text-only. Default: true.
    pub image_downloads_enabled: bool,

    /// Scheme prepended to the snapshot's scheme-less hero image URL.
    /// Default: "https".
    pub network_protocol: String,

    /// Minimum display height for showing the hero image, in dp.
    /// Default: [`MIN_SCREEN_HEIGHT_DP`].
    pub min_screen_height_dp: u32,

    /// Maximum title text height, in dp. Default: [`TITLE_MAX_HEIGHT_DP`].
    pub title_max_height_dp: u32,

    /// Title font size floor, in sp. Default: [`TITLE_MIN_SIZE_SP`].
    pub title_min_size_sp: u32,

    /// Title font size reduction step, in sp. Default: [`TITLE_STEP_SP`].
    pub title_step_sp: u32,

    /// Base title size in pixels; the starting candidate is this divided by
    /// the display density, in sp. Default: 96.0.
    pub title_base_size_px: f32,

    /// Delay before retrying measurement of a not-yet-measurable title view.
    /// Default: [`REMEASURE_DELAY`].
    pub remeasure_delay: Duration,

    /// Vertical pixel offset added below a detected face so the crop keeps
    /// the nose in frame. Default: 32.0.
    pub nose_offset_px: f32,

    /// Maximum number of lines the subtitle may add beyond the title's line
    /// count before it is suppressed. Default: 2.
    pub max_extra_subtitle_lines: u32,

    /// Hero image URLs ending in this suffix are never shown; such files are
    /// typically animations or diagrams that crop badly. Default: ".gif".
    pub animated_image_suffix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            image_downloads_enabled: true,
            network_protocol: "https".to_owned(),
            min_screen_height_dp: MIN_SCREEN_HEIGHT_DP,
            title_max_height_dp: TITLE_MAX_HEIGHT_DP,
            title_min_size_sp: TITLE_MIN_SIZE_SP,
            title_step_sp: TITLE_STEP_SP,
            title_base_size_px: 96.0,
            remeasure_delay: REMEASURE_DELAY,
            nose_offset_px: 32.0,
            max_extra_subtitle_lines: 2,
            animated_image_suffix: ".gif".to_owned(),
        }
    }
}
