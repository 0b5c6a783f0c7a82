//! Grid quantization
//!
//! `step` is the number of grid cells per second (see `Timeline::grid_step`).
//! Rounding uses `f64::round`, which rounds halfway cases away from zero:
//! `quantize(1.2345, 1000.0) == 1.235`. Results are clamped at zero, so the
//! tie-break only matters for non-negative inputs.

/// Snap `seconds` to the nearest multiple of `1 / step`
///
/// A non-positive or non-finite `step` has no grid; the input is only
/// clamped at zero.
pub fn quantize(seconds: f64, step: f64) -> f64 {
    if !is_valid_step(step) {
        return seconds.max(0.0);
    }
    ((seconds * step).round() / step).max(0.0)
}

/// Snap a duration, never letting it collapse to zero
///
/// A duration shorter than half a grid cell becomes one full cell.
pub fn quantize_duration(duration: f64, step: f64) -> f64 {
    let snapped = quantize(duration, step);
    if snapped > 0.0 || !is_valid_step(step) {
        snapped
    } else {
        1.0 / step
    }
}

pub fn is_valid_step(step: f64) -> bool {
    step.is_finite() && step > 0.0
}
