//! Property tests for the pure layout computations.
//!
//! Invariants:
//! 1. The crop anchor is always in `[0, 1]`, whatever the face detector
//!    reported.
//! 2. Without a face the anchor is the fixed default, for any image.
//! 3. A shrink decision always lands on the step ladder: strictly smaller,
//!    never below the floor, exactly one clamped step down.
//! 4. The fit search over an always-too-tall title terminates within
//!    `ceil((start - floor) / step)` shrink rounds at `min(start, floor)`.
//! 5. Padding is a pure function of its inputs and ignores the header height
//!    on the main page.

use proptest::prelude::*;

use masthead_core::{EngineConfig, PointF};
use masthead_engine::fit::{self, FitDecision};
use masthead_engine::focal;
use masthead_engine::padding;

// ── Helpers ────────────────────────────────────────────────────────────────

fn finite_coord() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn fit_config() -> impl Strategy<Value = EngineConfig> {
    (1u32..=400, 1u32..=48, 1u32..=16).prop_map(|(max_dp, floor_sp, step_sp)| EngineConfig {
        title_max_height_dp: max_dp,
        title_min_size_sp: floor_sp,
        title_step_sp: step_sp,
        ..EngineConfig::default()
    })
}

// ── Focal anchor ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn anchor_is_always_normalized(
        height in 1u32..8192,
        x in finite_coord(),
        y in finite_coord(),
        nose in 0.0f32..256.0,
    ) {
        let anchor = focal::compute(height, Some(PointF::new(x, y)), nose);
        prop_assert!(anchor.y >= 0.0);
        prop_assert!(anchor.y <= 1.0);
    }

    #[test]
    fn no_face_is_always_the_default(height in 0u32..8192, nose in 0.0f32..256.0) {
        let anchor = focal::compute(height, None, nose);
        prop_assert_eq!(anchor.y, focal::DEFAULT_FOCAL_Y);
    }

    #[test]
    fn face_above_the_frame_clamps_to_top(height in 64u32..8192, nose in 0.0f32..64.0) {
        // A face reported above the image can never pull the anchor past
        // the top edge.
        let anchor = focal::compute(height, Some(PointF::new(0.0, -(nose + 1.0))), nose);
        prop_assert_eq!(anchor.y, 0.0);
    }
}

// ── Title fit ──────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn shrink_steps_down_the_ladder(
        config in fit_config(),
        candidate in 1u32..400,
        measured in 0.0f32..10_000.0,
        density in 0.5f32..4.0,
    ) {
        match fit::evaluate(measured, density, candidate, &config) {
            FitDecision::Shrink(next) => {
                prop_assert!(next < candidate);
                prop_assert!(next >= config.title_min_size_sp);
                let expected = candidate
                    .saturating_sub(config.title_step_sp)
                    .max(config.title_min_size_sp);
                prop_assert_eq!(next, expected);
            }
            FitDecision::Fits => {
                // Fits is only legal when within budget or at the floor.
                let height_dp = (measured / density) as u32;
                prop_assert!(
                    height_dp <= config.title_max_height_dp
                        || candidate <= config.title_min_size_sp
                );
            }
        }
    }

    #[test]
    fn fit_search_terminates_within_bound(config in fit_config(), start in 1u32..400) {
        // Measured height permanently over budget: worst case for the search.
        let too_tall = (config.title_max_height_dp + 1) as f32;
        let bound = start
            .saturating_sub(config.title_min_size_sp)
            .div_ceil(config.title_step_sp);

        let mut size = start;
        let mut rounds = 0u32;
        loop {
            match fit::evaluate(too_tall, 1.0, size, &config) {
                FitDecision::Shrink(next) => {
                    size = next;
                    rounds += 1;
                    prop_assert!(rounds <= bound, "round budget exceeded at size {}", size);
                }
                FitDecision::Fits => break,
            }
        }
        // Starting at or below the floor fits immediately; otherwise the
        // search bottoms out exactly at the floor.
        prop_assert_eq!(size, start.min(config.title_min_size_sp));
    }

    #[test]
    fn initial_size_is_positive(base in 1.0f32..512.0, density in 0.5f32..4.0) {
        prop_assert!(fit::initial_size_sp(base, density) >= 1);
    }
}

// ── Padding ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn padding_is_deterministic(
        is_main in any::<bool>(),
        height in 0.0f32..10_000.0,
        offset in 0.0f32..2_000.0,
        density in 0.5f32..4.0,
    ) {
        let first = padding::recompute(is_main, height, offset, density);
        let second = padding::recompute(is_main, height, offset, density);
        prop_assert_eq!(first, second);
        prop_assert!(first >= 0);
    }

    #[test]
    fn main_page_padding_ignores_header_height(
        height_a in 0.0f32..10_000.0,
        height_b in 0.0f32..10_000.0,
        offset in 0.0f32..2_000.0,
        density in 0.5f32..4.0,
    ) {
        prop_assert_eq!(
            padding::recompute(true, height_a, offset, density),
            padding::recompute(true, height_b, offset, density),
        );
    }
}
