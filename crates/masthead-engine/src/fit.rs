#![forbid(unsafe_code)]

//! Title-fit search: shrink the title font until its measured height fits.
//!
//! The search is an explicit state machine driven through the scheduler
//! rather than recursion:
//!
//! ```text
//! AwaitingMeasurable ──(height == 0, retry after delay)──▶ AwaitingMeasurable
//! AwaitingMeasurable ──(height > 0, defer one tick)──────▶ Measured
//! Measured ──(too tall, above floor: shrink)─────────────▶ AwaitingMeasurable
//! Measured ──(fits, or floor reached)────────────────────▶ Done
//! ```
//!
//! The decision core here is pure; the engine owns the side effects (applying
//! sizes to the view, scheduling, finalizing). Within one pass the candidate
//! size is monotonically non-increasing and bounded below by the floor, so
//! even a pathologically tall title terminates after
//! `ceil((start - floor) / step)` shrink rounds.

use masthead_core::EngineConfig;

/// Outcome of evaluating a measured title height against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitDecision {
    /// The title is too tall; restart measurement with this smaller size.
    Shrink(u32),
    /// The title fits the budget, or the floor was reached; finalize.
    Fits,
}

/// Starting candidate size: the base title size in pixels divided by the
/// display density, in sp. Never below 1.
pub fn initial_size_sp(base_size_px: f32, density: f32) -> u32 {
    ((base_size_px / density) as u32).max(1)
}

/// Decide whether the candidate size fits the height budget.
///
/// Too tall means the measured height in dp exceeds the configured maximum.
/// Shrinking only happens while the candidate is above the floor; the shrunk
/// size is clamped to the floor.
pub fn evaluate(measured_height_px: f32, density: f32, candidate_sp: u32, config: &EngineConfig) -> FitDecision {
    let height_dp = (measured_height_px / density) as u32;
    if height_dp > config.title_max_height_dp && candidate_sp > config.title_min_size_sp {
        let shrunk = candidate_sp
            .saturating_sub(config.title_step_sp)
            .max(config.title_min_size_sp);
        FitDecision::Shrink(shrunk)
    } else {
        FitDecision::Fits
    }
}
