//! End-to-end layout pass scenarios on the headless harness.
//!
//! These exercise the full control flow: pass start, measurement retries,
//! shrink convergence, visibility finalization, padding publication order,
//! staleness, lifecycle teardown, and the independent image chain.

use masthead_core::{
    EngineConfig, FixedMetrics, ImageOutcome, PageSnapshot, PointF, Rgb,
};
use masthead_engine::header::HeaderVisibility;
use masthead_engine::HeaderView;
use masthead_engine::headless::{Harness, HeadlessHeaderConfig};

fn article_with_image(title: &str) -> PageSnapshot {
    let mut snapshot = PageSnapshot::titled(title);
    snapshot.language_code = "en".to_owned();
    snapshot.pronunciation_url = Some("upload.example/pron.ogg".to_owned());
    snapshot.lead_image_url = Some("upload.example/hero.jpg".to_owned());
    snapshot.lead_image_name = Some("Hero.jpg".to_owned());
    snapshot
}

fn harness() -> Harness {
    Harness::new(
        EngineConfig::default(),
        HeadlessHeaderConfig::default(),
        FixedMetrics::new(1.0, 1920.0),
    )
}

// --- pass completion and ordering ---

#[test]
fn article_pass_shows_image_header_and_completes_once() {
    let mut harness = harness();
    harness.bind_page(Some(article_with_image("Coffee")));
    let sequence = harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    assert_eq!(harness.completions()[0].sequence, sequence);
    {
        let header = harness.header();
        let header = header.borrow();
        assert_eq!(header.visibility(), HeaderVisibility::TextWithImage);
        assert_eq!(header.title_html(), "Coffee");
        assert_eq!(header.locale(), "en");
        assert_eq!(header.pronunciation(), Some("upload.example/pron.ogg"));
    }

    // Re-running the queue must not re-deliver completion.
    harness.run_until_idle();
    assert_eq!(harness.completions().len(), 1);
}

#[test]
fn padding_reaches_bridge_before_completion() {
    let mut harness = harness();
    harness.bind_page(Some(article_with_image("Coffee")));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    let completion = harness.completions()[0];
    assert!(
        completion.paddings_already_published >= 1,
        "content may load only after its padding is set"
    );
    // The padding carried matches the finalized header height.
    let expected = harness.header().borrow().height_px().round() as i32;
    assert_eq!(harness.padding_history().last(), Some(&expected));
}

#[test]
fn main_page_hides_header_regardless_of_image() {
    let mut harness = Harness::new(
        EngineConfig::default(),
        HeadlessHeaderConfig::default(),
        FixedMetrics::new(3.0, 1920.0).with_content_top_offset(150.0),
    );
    let mut snapshot = article_with_image("Main Page");
    snapshot.is_main_page = true;
    harness.bind_page(Some(snapshot));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    assert_eq!(
        harness.header().borrow().visibility(),
        HeaderVisibility::Hidden
    );
    // Hidden header: content is offset only by the host chrome.
    // 150 px at density 3.0 is 50 dp.
    assert_eq!(harness.padding_history(), vec![50]);
}

#[test]
fn animated_image_degrades_to_text_only() {
    let mut harness = harness();
    let mut snapshot = article_with_image("Fourier series");
    snapshot.lead_image_url = Some("upload.example/animation.gif".to_owned());
    harness.bind_page(Some(snapshot));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    assert_eq!(
        harness.header().borrow().visibility(),
        HeaderVisibility::TextOnly
    );
    // The load request was a clear, not a fetch.
    assert_eq!(harness.header().borrow().image_load_requests(), &[None]);
}

// --- title fit convergence ---

#[test]
fn overlong_title_shrinks_sixteen_to_twelve_in_two_rounds() {
    let config = EngineConfig {
        title_base_size_px: 16.0,
        title_max_height_dp: 50,
        ..EngineConfig::default()
    };
    let header_config = HeadlessHeaderConfig {
        wrap_width_px: 120.0,
        ..HeadlessHeaderConfig::default()
    };
    let mut harness = Harness::new(config, header_config, FixedMetrics::new(1.0, 1920.0));
    // 40 columns: 4 lines at 16 sp (over budget), 3 lines at 12 sp (fits).
    harness.bind_page(Some(PageSnapshot::titled("A".repeat(40))));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    let header = harness.header();
    let header = header.borrow();
    assert_eq!(header.title_size_sp(), 12);
    // Exactly one shrink: 16 applied, then 12. Two evaluation rounds.
    assert_eq!(header.title_size_history(), &[16, 12]);
}

#[test]
fn floor_is_accepted_even_when_still_too_tall() {
    let config = EngineConfig {
        title_base_size_px: 16.0,
        // Impossible budget: the title never fits.
        title_max_height_dp: 1,
        ..EngineConfig::default()
    };
    let mut harness = Harness::new(
        config,
        HeadlessHeaderConfig::default(),
        FixedMetrics::new(1.0, 1920.0),
    );
    harness.bind_page(Some(PageSnapshot::titled("Coffee")));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    assert_eq!(harness.header().borrow().title_size_sp(), 12);
}

#[test]
fn unmeasurable_view_retries_until_measurable() {
    let mut harness = Harness::new(
        EngineConfig::default(),
        HeadlessHeaderConfig {
            measurable_after_queries: 4,
            ..HeadlessHeaderConfig::default()
        },
        FixedMetrics::new(1.0, 1920.0),
    );
    harness.bind_page(Some(article_with_image("Coffee")));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    // Four zero-height polls, 50 ms apart, before convergence.
    assert!(harness.now_ms() >= 150);
}

// --- lifecycle and staleness ---

#[test]
fn teardown_before_first_measurement_never_completes() {
    let mut harness = Harness::new(
        EngineConfig::default(),
        HeadlessHeaderConfig {
            measurable_after_queries: 10,
            ..HeadlessHeaderConfig::default()
        },
        FixedMetrics::new(1.0, 1920.0),
    );
    harness.bind_page(Some(article_with_image("Coffee")));
    harness.begin_layout().expect("pass starts");
    harness.detach_screen();
    harness.run_until_idle();

    assert!(harness.completions().is_empty());
}

#[test]
fn superseded_pass_never_completes() {
    let mut harness = Harness::new(
        EngineConfig::default(),
        HeadlessHeaderConfig {
            measurable_after_queries: 2,
            ..HeadlessHeaderConfig::default()
        },
        FixedMetrics::new(1.0, 1920.0),
    );
    harness.bind_page(Some(article_with_image("Coffee")));
    let first = harness.begin_layout().expect("pass starts");
    let second = harness.begin_layout().expect("pass starts");
    assert_ne!(first, second);
    harness.run_until_idle();

    let delivered: Vec<u64> = harness
        .completions()
        .iter()
        .map(|completion| completion.sequence)
        .collect();
    assert_eq!(delivered, vec![second]);
}

#[test]
fn begin_layout_without_bound_page_is_inert() {
    let mut harness = harness();
    assert!(harness.begin_layout().is_none());
    harness.run_until_idle();
    assert!(harness.completions().is_empty());
    assert!(harness.padding_history().is_empty());
}

// --- subtitle ---

#[test]
fn short_description_is_kept_as_subtitle() {
    let mut harness = harness();
    let mut snapshot = article_with_image("Coffee");
    snapshot.description = Some("Brewed beverage".to_owned());
    harness.bind_page(Some(snapshot));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(
        harness.header().borrow().subtitle(),
        Some("Brewed beverage")
    );
}

#[test]
fn description_adding_three_lines_is_suppressed() {
    let header_config = HeadlessHeaderConfig {
        wrap_width_px: 120.0,
        ..HeadlessHeaderConfig::default()
    };
    let config = EngineConfig {
        title_base_size_px: 16.0,
        ..EngineConfig::default()
    };
    let mut harness = Harness::new(config, header_config, FixedMetrics::new(1.0, 1920.0));
    let mut snapshot = article_with_image("Tea");
    // 40 columns wrap to 3 subtitle lines at 14 sp with a 120 px measure:
    // three lines beyond the one-line title, over the two-line allowance.
    snapshot.description = Some("B".repeat(40));
    harness.bind_page(Some(snapshot));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    assert_eq!(harness.header().borrow().subtitle(), None);
    assert_eq!(harness.completions().len(), 1);
}

// --- image chain ---

#[test]
fn image_outcome_interleaves_with_fit_pass() {
    let mut harness = Harness::new(
        EngineConfig::default(),
        HeadlessHeaderConfig {
            measurable_after_queries: 2,
            ..HeadlessHeaderConfig::default()
        },
        FixedMetrics::new(1.0, 1920.0),
    );
    harness.bind_page(Some(article_with_image("Lion")));
    harness.begin_layout().expect("pass starts");

    // Image finishes while the fit pass is still polling measurability.
    harness.deliver_image(ImageOutcome::Loaded {
        image_height_px: 400,
        face: Some(PointF::new(180.0, 80.0)),
        dominant_color: Rgb::new(120, 90, 40),
    });
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    let header = harness.header();
    let header = header.borrow();
    // 80 / 400 + 32 / 400, clamped: 0.28.
    assert!((header.focal_y() - 0.28).abs() < 1e-4);
    assert_eq!(header.menu_tint(), Some(Rgb::new(120, 90, 40)));
    assert_eq!(header.cross_fades(), 1);
    assert!((harness.engine().focal_y() - 0.28).abs() < 1e-4);
}

#[test]
fn image_failure_restores_neutral_tint_without_touching_the_pass() {
    let mut harness = harness();
    harness.bind_page(Some(article_with_image("Lion")));
    harness.begin_layout().expect("pass starts");
    harness.deliver_image(ImageOutcome::Failed);
    harness.run_until_idle();

    assert_eq!(harness.completions().len(), 1);
    let header = harness.header();
    let header = header.borrow();
    assert_eq!(header.menu_tint(), None);
    assert_eq!(header.cross_fades(), 0);
    // The crop anchor was reset at load request and never re-anchored.
    assert_eq!(header.focal_y(), 0.0);
}

// --- padding level-triggering ---

#[test]
fn repeated_bounds_changes_publish_identical_padding() {
    let mut harness = harness();
    harness.bind_page(Some(article_with_image("Coffee")));
    harness.begin_layout().expect("pass starts");
    harness.run_until_idle();

    let published = harness.padding_history();
    let last = *published.last().expect("padding was published");

    // Same bounds, reported twice more: same value, no drift.
    harness.engine_mut().on_header_bounds_changed();
    harness.engine_mut().on_header_bounds_changed();
    let republished = harness.padding_history();
    assert_eq!(republished.len(), published.len() + 2);
    assert!(republished.iter().rev().take(3).all(|&p| p == last));
}
