#![forbid(unsafe_code)]

//! Core: value types and collaborator contracts for the masthead layout engine.
//!
//! This crate holds everything the engine and its host share but that carries
//! no orchestration logic: geometric primitives, display metrics, the bound
//! page snapshot, the engine configuration, the typed message/effect unions,
//! and the screen lifecycle probe.

pub mod config;
pub mod event;
pub mod geometry;
pub mod lifecycle;
pub mod metrics;
pub mod snapshot;

pub use config::EngineConfig;
pub use event::{
    BookmarkRequest, Effect, GalleryRequest, GeoRequest, ImageOutcome, MenuAction, Msg,
    ShareRequest,
};
pub use geometry::{PointF, Rgb};
pub use lifecycle::{LifecycleFlag, ScreenLifecycle};
pub use metrics::{DisplayMetrics, DisplayMetricsProvider, FixedMetrics};
pub use snapshot::{Coordinates, PageSnapshot};
