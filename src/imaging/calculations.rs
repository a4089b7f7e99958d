//! Pure calculation functions for dimensions and size arithmetic.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::ResizeTarget;

/// Resolve the output dimensions for a resize target.
///
/// - Both dimensions given: used as-is (the backend cover-fits into the box).
/// - Width only: height computed from the source aspect ratio.
///
/// # Examples
/// ```
/// # use imgpress::imaging::{resolve_output_dims, ResizeTarget};
/// // Cover-fit box is taken verbatim
/// assert_eq!(
///     resolve_output_dims((3000, 2000), ResizeTarget::exact(800, 600)),
///     (800, 600)
/// );
/// // Width-only preserves aspect: 150 wide from a 2:1 source → 75 tall
/// assert_eq!(
///     resolve_output_dims((1000, 500), ResizeTarget::width_only(150)),
///     (150, 75)
/// );
/// ```
pub fn resolve_output_dims(source: (u32, u32), target: ResizeTarget) -> (u32, u32) {
    match target.height {
        Some(h) => (target.width, h),
        None => {
            let (src_w, src_h) = source;
            let h = (target.width as f64 * src_h as f64 / src_w as f64).round() as u32;
            // A 1px-wide sliver still needs a nonzero height
            (target.width, h.max(1))
        }
    }
}

/// Integer-rounded percent reduction from `original` to `output` bytes.
///
/// Returns `None` when `original` is zero, so callers never divide by zero.
/// Negative values (output grew) are returned as-is, never clamped.
pub fn reduction_percent(original: u64, output: u64) -> Option<i32> {
    if original == 0 {
        return None;
    }
    let delta = original as f64 - output as f64;
    Some((delta / original as f64 * 100.0).round() as i32)
}

/// Byte count rounded to whole kilobytes, for display.
pub fn kb(bytes: u64) -> u64 {
    (bytes as f64 / 1024.0).round() as u64
}
