#![forbid(unsafe_code)]

//! Content padding derived from the header's on-screen bounds.
//!
//! Level-triggered: the host invokes the engine's bounds-change entry point
//! on every structural layout change of the header, and the resulting
//! padding is pushed to the content bridge each time. The computation is a
//! pure function of its inputs, so repeated invocations with identical
//! inputs publish identical values.
//!
//! On the main-page variant the header is hidden, so the content is offset
//! only by the host chrome above it; otherwise the content clears the full
//! header height.

/// Compute the content top padding in dp.
pub fn recompute(
    is_main_page: bool,
    header_height_px: f32,
    content_top_offset_px: f32,
    density: f32,
) -> i32 {
    let px = if is_main_page {
        content_top_offset_px
    } else {
        header_height_px
    };
    (px / density).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_padding_covers_header_height() {
        assert_eq!(recompute(false, 600.0, 150.0, 3.0), 200);
    }

    #[test]
    fn main_page_padding_covers_host_chrome() {
        assert_eq!(recompute(true, 600.0, 150.0, 3.0), 50);
    }

    #[test]
    fn recompute_is_idempotent() {
        let a = recompute(false, 421.7, 98.2, 2.625);
        let b = recompute(false, 421.7, 98.2, 2.625);
        assert_eq!(a, b);
    }

    #[test]
    fn rounds_to_nearest_dp() {
        assert_eq!(recompute(false, 100.0, 0.0, 3.0), 33);
        assert_eq!(recompute(false, 110.0, 0.0, 3.0), 37);
    }

    #[test]
    fn zero_height_header_yields_zero_padding() {
        assert_eq!(recompute(false, 0.0, 150.0, 3.0), 0);
    }
}
