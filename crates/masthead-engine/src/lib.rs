#![forbid(unsafe_code)]

//! Masthead layout engine.
//!
//! Adapts a page header (title text, hero image, subtitle, menu bar) to the
//! rendering surface before the surface's main content is allowed to render.
//!
//! # Key components
//!
//! - [`MastheadEngine`] - the orchestrator driving one layout pass at a time
//! - [`LayoutSequencer`] - sequence tokens that make stale passes inert
//! - [`fit`] - the title-fit measure/shrink state machine decisions
//! - [`focal`] - face-location to crop-anchor computation
//! - [`padding`] - content padding derived from header bounds
//! - [`ContentBridge`] / [`BridgeMessage`] - the padding message channel
//! - [`HeaderView`] - the contract the host's visual header implements
//! - [`Harness`] / [`HeadlessHeader`] - deterministic testing without a
//!   rendering surface
//!
//! # Control flow
//!
//! `begin_layout` starts a pass: metrics are refreshed, the hero image load
//! is requested, and the title-fit chain starts. Each engine step returns
//! [`Effect`](masthead_core::Effect)s; the host enqueues the scheduling
//! effects (next tick or delayed) and dispatches the outward ones. The image
//! chain interleaves arbitrarily with the fit chain; both are individually
//! idempotent. Padding is published to the content bridge from every header
//! bounds change, strictly before the host acts on `LayoutComplete`.

pub mod bridge;
pub mod engine;
pub mod fit;
pub mod focal;
pub mod header;
pub mod headless;
pub mod padding;
pub mod sequencer;

pub use bridge::{BridgeError, BridgeMessage, BridgeResult, ContentBridge, RecordingBridge};
pub use engine::MastheadEngine;
pub use fit::FitDecision;
pub use focal::FocalPoint;
pub use header::{HeaderView, HeaderVisibility};
pub use headless::{Harness, HeadlessHeader, HeadlessHeaderConfig};
pub use sequencer::LayoutSequencer;
