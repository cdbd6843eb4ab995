#![forbid(unsafe_code)]

//! Deterministic headless harness for engine testing.
//!
//! [`HeadlessHeader`] is an in-memory [`HeaderView`] with a simple but
//! deterministic text model: title text wraps at a configurable pixel width
//! using `unicode-width` column counts, and measured heights follow directly
//! from font size, density, and line count. A configurable measurability
//! latency models a host that has not laid the view out yet.
//!
//! [`Harness`] owns an engine wired to a headless header, a recording
//! bridge, fixed metrics, and a lifecycle flag, and executes scheduling
//! effects against a virtual clock. No real scheduler, no rendering surface,
//! no sleeping.
//!
//! # Ordering in the harness
//!
//! After each engine step the harness checks the header's height and, on
//! change, delivers the structural bounds-change notification *before*
//! executing the step's effects. This mirrors a real host, where view
//! finalization triggers the layout-change observer (and with it the padding
//! message) before anyone can act on the completion callback.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use unicode_width::UnicodeWidthStr;

use masthead_core::{Effect, EngineConfig, FixedMetrics, ImageOutcome, LifecycleFlag, MenuAction, Msg, PageSnapshot, Rgb};

use crate::bridge::RecordingBridge;
use crate::engine::MastheadEngine;
use crate::header::{HeaderView, HeaderVisibility};

// ---------------------------------------------------------------------------
// Headless header
// ---------------------------------------------------------------------------

/// Text and chrome model for the headless header.
#[derive(Debug, Clone)]
pub struct HeadlessHeaderConfig {
    /// Density scalar the fake surface renders at. Default: 1.0.
    pub density: f32,
    /// Pixel width the title block wraps at. Default: 1080.0.
    pub wrap_width_px: f32,
    /// Average glyph width as a fraction of the font size. Default: 0.6.
    pub glyph_aspect: f32,
    /// Line height as a multiple of the font size. Default: 1.2.
    pub line_spacing: f32,
    /// Font size the subtitle renders at, in sp. Default: 14.
    pub subtitle_size_sp: u32,
    /// Fixed chrome height (menu bar, margins) added to the visible header,
    /// in pixels. Default: 48.0.
    pub chrome_px: f32,
    /// Height of the hero image pane when shown, in pixels. Default: 640.0.
    pub image_pane_px: f32,
    /// Number of `text_height_px` queries that report zero before the view
    /// becomes measurable, modeling host layout latency. Default: 0.
    pub measurable_after_queries: u32,
}

impl Default for HeadlessHeaderConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            wrap_width_px: 1080.0,
            glyph_aspect: 0.6,
            line_spacing: 1.2,
            subtitle_size_sp: 14,
            chrome_px: 48.0,
            image_pane_px: 640.0,
            measurable_after_queries: 0,
        }
    }
}

/// In-memory header view with deterministic measurement.
#[derive(Debug)]
pub struct HeadlessHeader {
    config: HeadlessHeaderConfig,
    visibility: HeaderVisibility,
    title_html: String,
    locale: String,
    pronunciation: Option<String>,
    subtitle: Option<String>,
    title_size_sp: u32,
    title_size_history: Vec<u32>,
    image_load_requests: Vec<Option<String>>,
    focal_y: f32,
    menu_tint: Option<Rgb>,
    cross_fades: u32,
    zoom_animations: u32,
    bookmark_saved: bool,
    navigate_visible: bool,
    height_override: Option<f32>,
    text_queries: Cell<u32>,
}

impl HeadlessHeader {
    /// Create a headless header with the given text model.
    pub fn new(config: HeadlessHeaderConfig) -> Self {
        Self {
            config,
            visibility: HeaderVisibility::Hidden,
            title_html: String::new(),
            locale: String::new(),
            pronunciation: None,
            subtitle: None,
            title_size_sp: 0,
            title_size_history: Vec::new(),
            image_load_requests: Vec::new(),
            focal_y: 0.0,
            menu_tint: None,
            cross_fades: 0,
            zoom_animations: 0,
            bookmark_saved: false,
            navigate_visible: false,
            height_override: None,
            text_queries: Cell::new(0),
        }
    }

    /// Pin the reported header height, overriding the computed model.
    pub fn force_height_px(&mut self, height_px: f32) {
        self.height_override = Some(height_px);
    }

    /// Current visibility state.
    pub fn visibility(&self) -> HeaderVisibility {
        self.visibility
    }

    /// Title HTML as last applied.
    pub fn title_html(&self) -> &str {
        &self.title_html
    }

    /// Locale as last applied.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Pronunciation URL as last applied.
    pub fn pronunciation(&self) -> Option<&str> {
        self.pronunciation.as_deref()
    }

    /// Subtitle as last applied (None when suppressed).
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Title font size as last applied, in sp.
    pub fn title_size_sp(&self) -> u32 {
        self.title_size_sp
    }

    /// Every title font size applied, in order. Shrink rounds show up as
    /// successive entries.
    pub fn title_size_history(&self) -> &[u32] {
        &self.title_size_history
    }

    /// Every image load request in order; `None` entries are clears.
    pub fn image_load_requests(&self) -> &[Option<String>] {
        &self.image_load_requests
    }

    /// Current normalized crop anchor.
    pub fn focal_y(&self) -> f32 {
        self.focal_y
    }

    /// Current menu bar tint; `None` is the neutral default.
    pub fn menu_tint(&self) -> Option<Rgb> {
        self.menu_tint
    }

    /// Number of cross-fade animations started.
    pub fn cross_fades(&self) -> u32 {
        self.cross_fades
    }

    /// Number of zoom animations started.
    pub fn zoom_animations(&self) -> u32 {
        self.zoom_animations
    }

    /// Bookmark indicator state.
    pub fn bookmark_saved(&self) -> bool {
        self.bookmark_saved
    }

    /// Geo-navigation affordance visibility.
    pub fn navigate_visible(&self) -> bool {
        self.navigate_visible
    }

    /// Title text with HTML tags stripped, as the fake renderer lays it out.
    fn plain_title(&self) -> String {
        let mut out = String::with_capacity(self.title_html.len());
        let mut in_tag = false;
        for ch in self.title_html.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(ch),
                _ => {}
            }
        }
        out
    }

    /// Wrapped line count of `text` at the given font size.
    fn wrapped_lines(&self, text: &str, size_sp: u32) -> u32 {
        if text.is_empty() || size_sp == 0 {
            return 0;
        }
        let glyph_px = size_sp as f32 * self.config.density * self.config.glyph_aspect;
        let per_line = ((self.config.wrap_width_px / glyph_px) as u32).max(1);
        let columns = UnicodeWidthStr::width(text) as u32;
        columns.div_ceil(per_line).max(1)
    }

    fn line_height_px(&self, size_sp: u32) -> f32 {
        size_sp as f32 * self.config.density * self.config.line_spacing
    }

    /// Text block height ignoring measurability latency.
    fn raw_text_height_px(&self) -> f32 {
        let title = self.plain_title();
        let title_px = self.wrapped_lines(&title, self.title_size_sp) as f32
            * self.line_height_px(self.title_size_sp);
        let subtitle_px = self
            .subtitle
            .as_deref()
            .map(|text| {
                self.wrapped_lines(text, self.config.subtitle_size_sp) as f32
                    * self.line_height_px(self.config.subtitle_size_sp)
            })
            .unwrap_or(0.0);
        title_px + subtitle_px
    }
}

impl HeaderView for HeadlessHeader {
    fn set_title_html(&mut self, html: &str) {
        self.title_html = html.to_owned();
    }

    fn set_locale(&mut self, language_code: &str) {
        self.locale = language_code.to_owned();
    }

    fn set_pronunciation(&mut self, url: Option<&str>) {
        self.pronunciation = url.map(str::to_owned);
    }

    fn set_subtitle(&mut self, text: Option<&str>) {
        self.subtitle = text.map(str::to_owned);
    }

    fn set_title_size_sp(&mut self, size_sp: u32) {
        self.title_size_sp = size_sp;
        self.title_size_history.push(size_sp);
    }

    fn text_height_px(&self) -> f32 {
        let queries = self.text_queries.get();
        self.text_queries.set(queries + 1);
        if queries < self.config.measurable_after_queries {
            0.0
        } else {
            self.raw_text_height_px()
        }
    }

    fn line_count(&self) -> u32 {
        let title = self.plain_title();
        let mut lines = self.wrapped_lines(&title, self.title_size_sp);
        if let Some(text) = self.subtitle.as_deref() {
            lines += self.wrapped_lines(text, self.config.subtitle_size_sp);
        }
        lines
    }

    fn height_px(&self) -> f32 {
        if let Some(height) = self.height_override {
            return height;
        }
        match self.visibility {
            HeaderVisibility::Hidden => 0.0,
            HeaderVisibility::TextOnly => self.raw_text_height_px() + self.config.chrome_px,
            HeaderVisibility::TextWithImage => {
                self.raw_text_height_px() + self.config.chrome_px + self.config.image_pane_px
            }
        }
    }

    fn hide(&mut self) {
        self.visibility = HeaderVisibility::Hidden;
    }

    fn show_text_only(&mut self) {
        self.visibility = HeaderVisibility::TextOnly;
    }

    fn show_text_with_image(&mut self) {
        self.visibility = HeaderVisibility::TextWithImage;
    }

    fn load_image(&mut self, url: Option<&str>) {
        self.image_load_requests.push(url.map(str::to_owned));
    }

    fn set_image_focal_y(&mut self, y: f32) {
        self.focal_y = y;
    }

    fn cross_fade_image(&mut self) {
        self.cross_fades += 1;
    }

    fn play_zoom_animation(&mut self) {
        self.zoom_animations += 1;
    }

    fn set_menu_tint(&mut self, color: Rgb) {
        self.menu_tint = Some(color);
    }

    fn reset_menu_tint(&mut self) {
        self.menu_tint = None;
    }

    fn set_bookmark_saved(&mut self, saved: bool) {
        self.bookmark_saved = saved;
    }

    fn set_navigate_visible(&mut self, visible: bool) {
        self.navigate_visible = visible;
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Record of one delivered completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Sequence token of the completed pass.
    pub sequence: u64,
    /// Number of padding messages the bridge had already carried when the
    /// completion was delivered. Ordering assertions hang off this.
    pub paddings_already_published: usize,
}

#[derive(Debug)]
struct QueuedMsg {
    due_ms: u64,
    insertion: u64,
    msg: Msg,
}

/// Owns an engine over headless collaborators and executes its effects
/// against a virtual clock.
pub struct Harness {
    engine: MastheadEngine,
    header: Rc<RefCell<HeadlessHeader>>,
    bridge: Rc<RefCell<RecordingBridge>>,
    lifecycle: LifecycleFlag,
    queue: VecDeque<QueuedMsg>,
    now_ms: u64,
    next_insertion: u64,
    completions: Vec<Completion>,
    outward: Vec<Effect>,
    last_height_px: f32,
}

impl Harness {
    /// Build a harness from engine, header, and display configuration.
    pub fn new(
        config: EngineConfig,
        header_config: HeadlessHeaderConfig,
        metrics: FixedMetrics,
    ) -> Self {
        let header = Rc::new(RefCell::new(HeadlessHeader::new(header_config)));
        let bridge = Rc::new(RefCell::new(RecordingBridge::new()));
        let lifecycle = LifecycleFlag::active();
        let engine = MastheadEngine::new(
            config,
            Rc::clone(&header),
            Rc::clone(&bridge),
            metrics,
            lifecycle.clone(),
        );
        Self {
            engine,
            header,
            bridge,
            lifecycle,
            queue: VecDeque::new(),
            now_ms: 0,
            next_insertion: 0,
            completions: Vec::new(),
            outward: Vec::new(),
            // NaN compares unequal to everything, so the first observation
            // always fires, as a host's initial layout pass would.
            last_height_px: f32::NAN,
        }
    }

    /// Bind a page snapshot on the engine.
    pub fn bind_page(&mut self, snapshot: Option<PageSnapshot>) {
        self.engine.bind_page(snapshot);
    }

    /// Mark the owning screen as detached; every queued step will drop
    /// itself on resumption.
    pub fn detach_screen(&self) {
        self.lifecycle.set_active(false);
    }

    /// Start a layout pass. Returns the pass token, or `None` when no page
    /// is bound.
    pub fn begin_layout(&mut self) -> Option<u64> {
        let (sequence, effects) = self.engine.begin_layout()?;
        self.after_step(effects);
        Some(sequence)
    }

    /// Deliver an image load outcome, as the image collaborator would.
    pub fn deliver_image(&mut self, outcome: ImageOutcome) {
        let effects = self.engine.handle(Msg::Image(outcome));
        self.after_step(effects);
    }

    /// Deliver a click on the content surface; returns whether it was
    /// consumed as an image click.
    pub fn click(&mut self, x: f32, y: f32, scroll_y: f32) -> bool {
        let (consumed, effects) = self.engine.on_content_click(x, y, scroll_y);
        self.outward.extend(effects);
        consumed
    }

    /// Deliver a menu bar action.
    pub fn menu(&mut self, action: MenuAction) {
        let effects = self.engine.on_menu(action);
        self.outward.extend(effects);
    }

    /// Run queued messages in due order until the queue drains, advancing
    /// the virtual clock past delays as needed.
    pub fn run_until_idle(&mut self) {
        while self.step() {}
    }

    /// Process the single earliest queued message. Returns false when the
    /// queue is empty.
    pub fn step(&mut self) -> bool {
        let Some(index) = self.next_due_index() else {
            return false;
        };
        let queued = self
            .queue
            .remove(index)
            .expect("index from next_due_index is in bounds");
        self.now_ms = self.now_ms.max(queued.due_ms);
        let effects = self.engine.handle(queued.msg);
        self.after_step(effects);
        true
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Completions delivered so far, in order.
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    /// Outward (non-scheduling) effects dispatched so far.
    pub fn outward(&self) -> &[Effect] {
        &self.outward
    }

    /// Padding values carried by the bridge so far.
    pub fn padding_history(&self) -> Vec<i32> {
        self.bridge.borrow().padding_history()
    }

    /// Shared handle to the headless header for inspection.
    pub fn header(&self) -> Rc<RefCell<HeadlessHeader>> {
        Rc::clone(&self.header)
    }

    /// Direct access to the engine for assertions on accessors.
    pub fn engine(&self) -> &MastheadEngine {
        &self.engine
    }

    /// Mutable access to the engine, for host-style calls not covered by the
    /// harness helpers.
    pub fn engine_mut(&mut self) -> &mut MastheadEngine {
        &mut self.engine
    }

    /// Bounds observation then effect execution, in that order; see the
    /// module docs on ordering.
    fn after_step(&mut self, effects: Vec<Effect>) {
        self.sync_bounds();
        self.execute(effects);
    }

    /// Fire the structural layout-change observer if the header's height
    /// changed during the last step.
    fn sync_bounds(&mut self) {
        let height = self.header.borrow().height_px();
        if height != self.last_height_px {
            self.last_height_px = height;
            self.engine.on_header_bounds_changed();
        }
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::NextTick(msg) => self.enqueue(self.now_ms, msg),
                Effect::After(delay, msg) => {
                    self.enqueue(self.now_ms + delay.as_millis() as u64, msg);
                }
                Effect::LayoutComplete(sequence) => {
                    self.completions.push(Completion {
                        sequence,
                        paddings_already_published: self.padding_history().len(),
                    });
                }
                outward => self.outward.push(outward),
            }
        }
    }

    fn enqueue(&mut self, due_ms: u64, msg: Msg) {
        let insertion = self.next_insertion;
        self.next_insertion += 1;
        self.queue.push_back(QueuedMsg {
            due_ms,
            insertion,
            msg,
        });
    }

    /// Index of the earliest due message, FIFO among equals.
    fn next_due_index(&self) -> Option<usize> {
        self.queue
            .iter()
            .enumerate()
            .min_by_key(|(_, queued)| (queued.due_ms, queued.insertion))
            .map(|(index, _)| index)
    }
}
