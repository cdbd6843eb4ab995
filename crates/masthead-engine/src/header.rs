#![forbid(unsafe_code)]

//! Header view contract.
//!
//! The visual header (title, subtitle, hero image, menu bar) is owned and
//! rendered by the host; the engine mutates it through this trait and never
//! reads it back as a source of truth for decisions — decisions derive from
//! the page snapshot and measurements, which avoids feedback loops. The only
//! reads are physical measurements the host's layout produced: text height,
//! line count, and overall header height.

use std::cell::RefCell;
use std::rc::Rc;

use masthead_core::Rgb;

/// Visibility state of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderVisibility {
    /// The header is fully hidden (main page, or error path).
    #[default]
    Hidden,
    /// Title block only; the hero image is suppressed.
    TextOnly,
    /// Title block over the hero image.
    TextWithImage,
}

/// Contract the host's visual header implements.
///
/// All mutation happens on the single logical scheduler thread, so
/// implementations need no internal locking.
pub trait HeaderView {
    /// Set the title, honoring any HTML formatting it contains.
    fn set_title_html(&mut self, html: &str);

    /// Set the language the title is rendered in (drives typography).
    fn set_locale(&mut self, language_code: &str);

    /// Set or clear the pronunciation audio affordance next to the title.
    fn set_pronunciation(&mut self, url: Option<&str>);

    /// Set or clear the subtitle below the title.
    fn set_subtitle(&mut self, text: Option<&str>);

    /// Apply a title font size in sp.
    fn set_title_size_sp(&mut self, size_sp: u32);

    /// Measured height of the title block in pixels. Zero while the host has
    /// not laid the view out yet.
    fn text_height_px(&self) -> f32;

    /// Current total line count of the title block (title plus subtitle).
    fn line_count(&self) -> u32;

    /// Current on-screen height of the whole header in pixels.
    fn height_px(&self) -> f32;

    /// Hide the header entirely.
    fn hide(&mut self);

    /// Show the title block without the hero image.
    fn show_text_only(&mut self);

    /// Show the title block over the hero image.
    fn show_text_with_image(&mut self);

    /// Request an image load, or clear the current image with `None`.
    /// Completion arrives asynchronously as an image outcome message.
    fn load_image(&mut self, url: Option<&str>);

    /// Set the image's normalized vertical crop anchor.
    fn set_image_focal_y(&mut self, y: f32);

    /// Cross-fade the freshly loaded image into view.
    fn cross_fade_image(&mut self);

    /// Start the slow zoom animation on the hero image.
    fn play_zoom_animation(&mut self);

    /// Tint the menu bar with the image's dominant color.
    fn set_menu_tint(&mut self, color: Rgb);

    /// Restore the neutral menu bar tint.
    fn reset_menu_tint(&mut self);

    /// Reflect the page's bookmark state on the menu bar.
    fn set_bookmark_saved(&mut self, saved: bool);

    /// Show or hide the geo-navigation affordance on the menu bar.
    fn set_navigate_visible(&mut self, visible: bool);
}

/// Shared single-threaded handles work as header views, letting a host (or
/// test) keep a handle for inspection while the engine owns another.
impl<H: HeaderView> HeaderView for Rc<RefCell<H>> {
    fn set_title_html(&mut self, html: &str) {
        self.borrow_mut().set_title_html(html);
    }

    fn set_locale(&mut self, language_code: &str) {
        self.borrow_mut().set_locale(language_code);
    }

    fn set_pronunciation(&mut self, url: Option<&str>) {
        self.borrow_mut().set_pronunciation(url);
    }

    fn set_subtitle(&mut self, text: Option<&str>) {
        self.borrow_mut().set_subtitle(text);
    }

    fn set_title_size_sp(&mut self, size_sp: u32) {
        self.borrow_mut().set_title_size_sp(size_sp);
    }

    fn text_height_px(&self) -> f32 {
        self.borrow().text_height_px()
    }

    fn line_count(&self) -> u32 {
        self.borrow().line_count()
    }

    fn height_px(&self) -> f32 {
        self.borrow().height_px()
    }

    fn hide(&mut self) {
        self.borrow_mut().hide();
    }

    fn show_text_only(&mut self) {
        self.borrow_mut().show_text_only();
    }

    fn show_text_with_image(&mut self) {
        self.borrow_mut().show_text_with_image();
    }

    fn load_image(&mut self, url: Option<&str>) {
        self.borrow_mut().load_image(url);
    }

    fn set_image_focal_y(&mut self, y: f32) {
        self.borrow_mut().set_image_focal_y(y);
    }

    fn cross_fade_image(&mut self) {
        self.borrow_mut().cross_fade_image();
    }

    fn play_zoom_animation(&mut self) {
        self.borrow_mut().play_zoom_animation();
    }

    fn set_menu_tint(&mut self, color: Rgb) {
        self.borrow_mut().set_menu_tint(color);
    }

    fn reset_menu_tint(&mut self) {
        self.borrow_mut().reset_menu_tint();
    }

    fn set_bookmark_saved(&mut self, saved: bool) {
        self.borrow_mut().set_bookmark_saved(saved);
    }

    fn set_navigate_visible(&mut self, visible: bool) {
        self.borrow_mut().set_navigate_visible(visible);
    }
}
