#![forbid(unsafe_code)]

//! Typed messages and effects.
//!
//! The engine is driven entirely through these unions: the host (or test
//! harness) feeds [`Msg`] values into the engine and executes the returned
//! [`Effect`] values. "Concurrency" is interleaving of message chains on one
//! logical thread; there is no parallel execution.
//!
//! Each async collaborator reports through a tagged outcome
//! ([`ImageOutcome`]) rather than optional callback fields, so handling is
//! exhaustively pattern-matched.

use std::time::Duration;

use crate::geometry::{PointF, Rgb};
use crate::snapshot::Coordinates;

/// Outcome of a hero image load attempt, reported at most once per attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageOutcome {
    /// The image was fetched and decoded.
    Loaded {
        /// Decoded bitmap height in pixels.
        image_height_px: u32,
        /// Detected face location within the bitmap, if any.
        face: Option<PointF>,
        /// Dominant color of the image, applied to the menu bar tint.
        dominant_color: Rgb,
    },
    /// The fetch or decode failed.
    Failed,
}

/// A message delivered to the engine's `handle` entry point.
///
/// Messages carry their pass's sequence token as plain data; staleness is
/// decided by comparing that token at the point of action, never inferred
/// from identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Apply a candidate title size and check whether the view is measurable.
    TitleMeasure {
        /// Candidate font size under test, in sp.
        font_size_sp: u32,
        /// Sequence token of the owning pass.
        sequence: u64,
    },
    /// Evaluate whether the just-applied title size fits the height budget.
    /// Scheduled one tick after measurement so the size change is reflected.
    TitleEvaluate {
        /// Candidate font size under test, in sp.
        font_size_sp: u32,
        /// Sequence token of the owning pass.
        sequence: u64,
    },
    /// An image load attempt finished.
    Image(ImageOutcome),
    /// Apply the focal point and styling for a loaded image. Deferred one
    /// tick from [`Msg::Image`] so it runs from the scheduler context.
    ApplyImageFocus {
        /// Decoded bitmap height in pixels.
        image_height_px: u32,
        /// Detected face location, if any.
        face: Option<PointF>,
        /// Dominant color for the menu bar tint.
        dominant_color: Rgb,
    },
}

/// A request to open the gallery on the hero image.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryRequest {
    /// Display title of the page the image belongs to.
    pub page_title: String,
    /// `File:`-prefixed title of the image to open.
    pub image_title: String,
}

/// A request to save or delete a bookmark for the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRequest {
    /// Display title of the page.
    pub page_title: String,
}

/// A request to share the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareRequest {
    /// Display title of the page.
    pub page_title: String,
}

/// A request to open an external map on the page's location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRequest {
    /// Location of the page's subject.
    pub coordinates: Coordinates,
    /// Human-readable label for the location pin.
    pub label: String,
}

/// An effect produced by an engine step, executed by the host.
///
/// Scheduling effects re-enter the engine through [`Msg`]; the rest are
/// outward requests to external collaborators whose internals are out of
/// scope here.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver the message on the next scheduler tick.
    NextTick(Msg),
    /// Deliver the message after the given delay.
    After(Duration, Msg),
    /// The pass with this sequence token finished; the host may resume
    /// loading content. Delivered at most once per token.
    LayoutComplete(u64),
    /// Open the gallery collaborator on the hero image.
    OpenGallery(GalleryRequest),
    /// Save a bookmark for the current page.
    SaveBookmark(BookmarkRequest),
    /// Delete the bookmark for the current page.
    DeleteBookmark(BookmarkRequest),
    /// Share the current page.
    Share(ShareRequest),
    /// Dispatch a geo-navigation intent for the current page.
    NavigateGeo(GeoRequest),
}

/// A menu bar action forwarded from the header's interactive menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// The bookmark toggle was clicked; `saved` is the new desired state.
    Bookmark {
        /// True to save, false to delete.
        saved: bool,
    },
    /// The share button was clicked.
    Share,
    /// The geo-navigation button was clicked.
    NavigateGeo,
}
