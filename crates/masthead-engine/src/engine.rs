#![forbid(unsafe_code)]

//! Engine orchestration: one layout pass at a time, staleness-safe.
//!
//! # Pass anatomy
//!
//! [`MastheadEngine::begin_layout`] refreshes display metrics, requests the
//! hero image load, applies title/subtitle text, and starts the title-fit
//! chain. Every subsequent step arrives through [`MastheadEngine::handle`]
//! and returns effects the host schedules or dispatches. A step belonging to
//! a superseded pass, or arriving after the owning screen detached, drops
//! itself silently — that is a normal lifecycle race, not an error.
//!
//! # Ordering
//!
//! Padding must reach the content bridge before the host acts on
//! `LayoutComplete`. The engine enforces its half of this by finalizing the
//! header (which triggers the host's structural bounds-change notification,
//! and with it [`MastheadEngine::on_header_bounds_changed`]) before the
//! completion effect is emitted. The image chain is independent of the fit
//! chain and may interleave with it arbitrarily.
//!
//! # Metrics staleness
//!
//! Metrics are derived once per pass and deliberately not re-validated
//! mid-pass, even though a pass can span several scheduler ticks.

use tracing::{debug, trace, warn};

use masthead_core::{
    BookmarkRequest, DisplayMetrics, DisplayMetricsProvider, Effect, EngineConfig, GalleryRequest,
    GeoRequest, ImageOutcome, MenuAction, Msg, PageSnapshot, ScreenLifecycle, ShareRequest,
};

use crate::bridge::{BridgeMessage, ContentBridge};
use crate::fit::{self, FitDecision};
use crate::focal::{self, FocalPoint};
use crate::header::HeaderView;
use crate::padding;
use crate::sequencer::LayoutSequencer;

/// The adaptive header layout engine.
///
/// Owns the collaborators it mutates (header view, content bridge) and
/// queries (metrics provider, lifecycle probe), plus the snapshot of the
/// currently bound page. All methods run on the host's single logical
/// scheduler thread.
pub struct MastheadEngine {
    config: EngineConfig,
    header: Box<dyn HeaderView>,
    bridge: Box<dyn ContentBridge>,
    metrics_provider: Box<dyn DisplayMetricsProvider>,
    lifecycle: Box<dyn ScreenLifecycle>,
    sequencer: LayoutSequencer,
    /// Metrics sampled at the start of the current pass.
    metrics: DisplayMetrics,
    snapshot: Option<PageSnapshot>,
    /// Last computed focal point, already clamped.
    focal_y: f32,
}

impl MastheadEngine {
    /// Create an engine over the given collaborators.
    ///
    /// The header starts hidden; the only way to show it is a completed
    /// layout pass.
    pub fn new(
        config: EngineConfig,
        header: impl HeaderView + 'static,
        bridge: impl ContentBridge + 'static,
        metrics_provider: impl DisplayMetricsProvider + 'static,
        lifecycle: impl ScreenLifecycle + 'static,
    ) -> Self {
        let mut header: Box<dyn HeaderView> = Box::new(header);
        header.hide();
        let metrics = metrics_provider.refresh();
        Self {
            config,
            header,
            bridge: Box::new(bridge),
            metrics_provider: Box::new(metrics_provider),
            lifecycle: Box::new(lifecycle),
            sequencer: LayoutSequencer::new(),
            metrics,
            snapshot: None,
            focal_y: FocalPoint::default().y,
        }
    }

    /// Bind a page snapshot, or clear the binding with `None`.
    ///
    /// The engine only reads the snapshot; a pass requested while no page is
    /// bound is a no-op.
    pub fn bind_page(&mut self, snapshot: Option<PageSnapshot>) {
        self.snapshot = snapshot;
    }

    /// The snapshot currently bound, if any.
    pub fn page(&self) -> Option<&PageSnapshot> {
        self.snapshot.as_ref()
    }

    /// Completely hide the header. Useful on network errors; only a layout
    /// pass shows it again.
    pub fn hide(&mut self) {
        self.header.hide();
    }

    /// Normalized vertical focal point of the hero image, in `[0, 1]`.
    pub fn focal_y(&self) -> f32 {
        self.focal_y
    }

    /// Whether the hero image may currently be shown: downloads enabled,
    /// screen tall enough, a lead image URL present, and the URL not an
    /// animated format.
    pub fn is_image_eligible(&self) -> bool {
        let Some(url) = self
            .snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.lead_image_url.as_deref())
        else {
            return false;
        };
        self.config.image_downloads_enabled
            && self.metrics.height_dp >= self.config.min_screen_height_dp
            && !url.ends_with(&self.config.animated_image_suffix)
    }

    /// Reflect the page's bookmark state on the menu bar.
    pub fn update_bookmark(&mut self, saved: bool) {
        self.header.set_bookmark_saved(saved);
    }

    /// Show or hide the geo-navigation affordance on the menu bar.
    pub fn update_navigate(&mut self, has_geo: bool) {
        self.header.set_navigate_visible(has_geo);
    }

    // -----------------------------------------------------------------------
    // Layout pass
    // -----------------------------------------------------------------------

    /// Start a layout pass.
    ///
    /// Returns `None` (no pass, no completion will ever fire) when no page is
    /// bound. Otherwise returns the fresh sequence token and the initial
    /// effects of the title-fit chain. Starting a pass supersedes any
    /// in-flight one: its remaining steps become inert and its completion
    /// will never be delivered.
    pub fn begin_layout(&mut self) -> Option<(u64, Vec<Effect>)> {
        let snapshot = self.snapshot.clone()?;

        self.metrics = self.metrics_provider.refresh();
        let sequence = self.sequencer.begin();
        debug!(sequence, height_dp = self.metrics.height_dp, "layout pass started");

        self.load_hero_image(&snapshot);
        self.header.set_title_html(&snapshot.display_title_html);
        self.header.set_locale(&snapshot.language_code);
        self.header
            .set_pronunciation(snapshot.pronunciation_url.as_deref());
        // Subtitle is applied before measurement so text heights are accurate.
        self.layout_subtitle(snapshot.description.as_deref());

        let size_sp = fit::initial_size_sp(self.config.title_base_size_px, self.metrics.density);
        let effects = self.title_measure(size_sp, sequence);
        Some((sequence, effects))
    }

    /// Drive one engine step.
    pub fn handle(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::TitleMeasure {
                font_size_sp,
                sequence,
            } => self.title_measure(font_size_sp, sequence),
            Msg::TitleEvaluate {
                font_size_sp,
                sequence,
            } => self.title_evaluate(font_size_sp, sequence),
            Msg::Image(ImageOutcome::Loaded {
                image_height_px,
                face,
                dominant_color,
            }) => {
                // Defer one tick so styling runs from the scheduler context.
                vec![Effect::NextTick(Msg::ApplyImageFocus {
                    image_height_px,
                    face,
                    dominant_color,
                })]
            }
            Msg::Image(ImageOutcome::Failed) => {
                self.header.reset_menu_tint();
                Vec::new()
            }
            Msg::ApplyImageFocus {
                image_height_px,
                face,
                dominant_color,
            } => {
                if !self.lifecycle.is_active() {
                    trace!("screen detached; dropping image focus step");
                    return Vec::new();
                }
                let focal = focal::compute(image_height_px, face, self.config.nose_offset_px);
                self.focal_y = focal.y;
                self.header.set_image_focal_y(focal.y);
                self.header.set_menu_tint(dominant_color);
                self.header.cross_fade_image();
                self.header.play_zoom_animation();
                debug!(focal_y = focal.y, "hero image styled");
                Vec::new()
            }
        }
    }

    /// Recompute and publish content padding from the header's current
    /// bounds. The host wires this to every structural layout change of the
    /// header, which makes it level-triggered and guarantees the padding
    /// caused by finalization reaches the bridge before content loads.
    pub fn on_header_bounds_changed(&mut self) {
        let is_main_page = self
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| snapshot.is_main_page);
        let padding_dp = padding::recompute(
            is_main_page,
            self.header.height_px(),
            self.metrics_provider.content_top_offset_px(),
            self.metrics.density,
        );
        let message = BridgeMessage::set_padding_top(padding_dp);
        if let Err(err) = self.bridge.send(&message) {
            warn!(%err, "content bridge rejected padding message");
        }
    }

    /// Intercept a click at content-surface coordinates.
    ///
    /// A click inside the header's visible bounds while the hero image is
    /// shown is an image click: consumed, and answered with a gallery
    /// request when the image's file name is known.
    pub fn on_content_click(&self, _x: f32, y: f32, scroll_y: f32) -> (bool, Vec<Effect>) {
        let Some(snapshot) = &self.snapshot else {
            return (false, Vec::new());
        };
        if !self.is_image_eligible() || y >= self.header.height_px() - scroll_y {
            return (false, Vec::new());
        }
        let effects = snapshot
            .lead_image_name
            .as_deref()
            .map(|name| {
                vec![Effect::OpenGallery(GalleryRequest {
                    page_title: snapshot.display_title_html.clone(),
                    image_title: format!("File:{name}"),
                })]
            })
            .unwrap_or_default();
        (true, effects)
    }

    /// Dispatch a menu bar action as an outward effect. No-op without a
    /// bound page; geo navigation additionally requires coordinates.
    pub fn on_menu(&self, action: MenuAction) -> Vec<Effect> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        let page_title = snapshot.display_title_html.clone();
        match action {
            MenuAction::Bookmark { saved: true } => {
                vec![Effect::SaveBookmark(BookmarkRequest { page_title })]
            }
            MenuAction::Bookmark { saved: false } => {
                vec![Effect::DeleteBookmark(BookmarkRequest { page_title })]
            }
            MenuAction::Share => vec![Effect::Share(ShareRequest { page_title })],
            MenuAction::NavigateGeo => snapshot
                .geo
                .map(|coordinates| {
                    vec![Effect::NavigateGeo(GeoRequest {
                        coordinates,
                        label: page_title,
                    })]
                })
                .unwrap_or_default(),
        }
    }

    // -----------------------------------------------------------------------
    // Title-fit steps
    // -----------------------------------------------------------------------

    /// `AwaitingMeasurable`: apply the candidate size, then either retry
    /// after a delay (view not yet measurable) or defer one tick and
    /// evaluate.
    fn title_measure(&mut self, font_size_sp: u32, sequence: u64) -> Vec<Effect> {
        if !self.pass_step_allowed(sequence) {
            return Vec::new();
        }
        self.header.set_title_size_sp(font_size_sp);
        if self.header.text_height_px() == 0.0 {
            vec![Effect::After(
                self.config.remeasure_delay,
                Msg::TitleMeasure {
                    font_size_sp,
                    sequence,
                },
            )]
        } else {
            // One tick for the just-applied size to be reflected in layout.
            vec![Effect::NextTick(Msg::TitleEvaluate {
                font_size_sp,
                sequence,
            })]
        }
    }

    /// `Measured`: shrink and restart measurement, or finalize.
    fn title_evaluate(&mut self, font_size_sp: u32, sequence: u64) -> Vec<Effect> {
        if !self.pass_step_allowed(sequence) {
            return Vec::new();
        }
        let measured = self.header.text_height_px();
        match fit::evaluate(measured, self.metrics.density, font_size_sp, &self.config) {
            FitDecision::Shrink(next_sp) => {
                trace!(sequence, from = font_size_sp, to = next_sp, "title too tall; shrinking");
                self.title_measure(next_sp, sequence)
            }
            FitDecision::Fits => self.finalize(sequence),
        }
    }

    /// `Done`: apply visibility and report completion exactly once.
    fn finalize(&mut self, sequence: u64) -> Vec<Effect> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };
        if snapshot.is_main_page {
            self.header.hide();
        } else if self.is_image_eligible() {
            self.header.show_text_with_image();
        } else {
            self.header.show_text_only();
        }

        if self.sequencer.try_complete(sequence) {
            debug!(sequence, "layout pass complete");
            vec![Effect::LayoutComplete(sequence)]
        } else {
            Vec::new()
        }
    }

    /// Common guard for every resumption of a pass step: the owning screen
    /// must still be active and the token must still be live.
    fn pass_step_allowed(&self, sequence: u64) -> bool {
        if !self.lifecycle.is_active() {
            trace!(sequence, "screen detached; dropping pass step");
            return false;
        }
        if !self.sequencer.is_live(sequence) {
            trace!(sequence, "pass superseded; dropping step");
            return false;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Hero image and subtitle
    // -----------------------------------------------------------------------

    /// Request the hero image load, or clear the image when ineligible. The
    /// crop anchor resets to the top so a previous page's anchor never
    /// flashes on the new image.
    fn load_hero_image(&mut self, snapshot: &PageSnapshot) {
        let url = snapshot
            .lead_image_url
            .as_deref()
            .filter(|url| !url.is_empty());
        match url {
            Some(url) if !snapshot.is_main_page && self.is_image_eligible() => {
                self.header.set_image_focal_y(0.0);
                let full_url = format!("{}:{}", self.config.network_protocol, url);
                self.header.load_image(Some(&full_url));
            }
            _ => self.header.load_image(None),
        }
    }

    /// Apply the description as a subtitle, suppressing it when it adds more
    /// lines than allowed beyond the title's own line count.
    fn layout_subtitle(&mut self, description: Option<&str>) {
        match description.filter(|text| !text.is_empty()) {
            None => self.header.set_subtitle(None),
            Some(text) => {
                let title_lines = self.header.line_count();
                self.header.set_subtitle(Some(text));
                let extra = self.header.line_count().saturating_sub(title_lines);
                if extra > self.config.max_extra_subtitle_lines {
                    self.header.set_subtitle(None);
                }
            }
        }
    }
}
