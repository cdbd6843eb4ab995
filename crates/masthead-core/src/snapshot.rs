#![forbid(unsafe_code)]

//! Read-only snapshot of the page currently bound to the header.
//!
//! The snapshot is owned by the surrounding page-viewing component. The
//! engine only reads it; it is never mutated from engine code, and its
//! absence (no page bound yet) makes a layout pass a no-op.

/// Geographic coordinates attached to a page, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Read-only view of the article bound to the header.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSnapshot {
    /// Main-page variant: suppresses the header entirely regardless of image
    /// availability.
    pub is_main_page: bool,
    /// Display title, possibly containing HTML formatting.
    pub display_title_html: String,
    /// Language code of the page's wiki (drives title typography).
    pub language_code: String,
    /// URL of the title pronunciation audio, if available.
    pub pronunciation_url: Option<String>,
    /// Short description shown as the header subtitle, if available.
    pub description: Option<String>,
    /// Scheme-less URL of the hero image, if the page has one.
    pub lead_image_url: Option<String>,
    /// Bare file name of the hero image, used for gallery navigation.
    pub lead_image_name: Option<String>,
    /// Geographic location of the page's subject, if any.
    pub geo: Option<Coordinates>,
}

impl PageSnapshot {
    /// Create a snapshot with just a title; remaining fields default to
    /// absent. Convenient for hosts and tests that fill in the rest.
    pub fn titled(display_title_html: impl Into<String>) -> Self {
        Self {
            display_title_html: display_title_html.into(),
            ..Self::default()
        }
    }
}
