// Math utilities for fades and tints

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fraction of a fade that has elapsed.
///
/// Not clamped: callers only sample this while `elapsed < duration`.
/// A non-positive duration counts as already finished.
pub fn fade_fraction(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        elapsed / duration
    }
}
