use std::f64::consts::{PI, TAU};

/// Intervals shorter than this are treated as instantaneous.
pub(crate) const SPAN_EPSILON: f64 = 1e-12;

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `value` inside `[start, end]`, clamped to `[0, 1]`.
///
/// A zero-length interval is a step: `1` once `value` reaches `end`, else `0`.
pub(crate) fn fraction(value: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if span.abs() <= SPAN_EPSILON || !span.is_finite() {
        return if value >= end { 1.0 } else { 0.0 };
    }
    ((value - start) / span).clamp(0.0, 1.0)
}

/// Wrap an angle into `[0, 2π)`.
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// `sin(π t)`: 0 at both ends, 1 in the middle.
pub(crate) fn arch(t: f64) -> f64 {
    (PI * t.clamp(0.0, 1.0)).sin()
}

pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
