//! Property tests for display metric derivation.
//!
//! Invariants:
//! 1. The derived density is always finite and strictly positive, whatever
//!    the host reported.
//! 2. `height_dp` is the pixel height over the (sanitized) density,
//!    truncated, and zero for any degenerate pixel height.

use proptest::prelude::*;

use masthead_core::DisplayMetrics;

proptest! {
    #[test]
    fn density_is_always_usable(density in -100.0f32..100.0, height_px in -1.0e5f32..1.0e5) {
        let metrics = DisplayMetrics::from_raw(density, height_px);
        prop_assert!(metrics.density.is_finite());
        prop_assert!(metrics.density > 0.0);
    }

    #[test]
    fn height_dp_matches_sanitized_division(density in 0.5f32..4.0, height_px in 0.0f32..1.0e5) {
        let metrics = DisplayMetrics::from_raw(density, height_px);
        if height_px > 0.0 {
            prop_assert_eq!(metrics.height_dp, (height_px / density) as u32);
        } else {
            prop_assert_eq!(metrics.height_dp, 0);
        }
    }

    #[test]
    fn non_finite_inputs_degrade_to_the_default_gate(height_px in -1.0e5f32..1.0e5) {
        for density in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 0.0, -2.0] {
            let metrics = DisplayMetrics::from_raw(density, height_px);
            prop_assert_eq!(metrics.density, 1.0);
        }
        let metrics = DisplayMetrics::from_raw(2.0, f32::NAN);
        prop_assert_eq!(metrics.height_dp, 0);
    }
}
