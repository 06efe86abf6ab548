//! Exact trigonometry for the cardinal rotations.
//!
//! Repeated 90° rotations must compose without rounding drift, so the
//! cosine/sine of 0°, 90°, 180° and 270° are fixed lookup values. The trig
//! fallback exists for completeness only; the layout kernel itself never
//! rotates by anything but the four multiples.

/// Cosine of `degrees`, exact at the four cardinal multiples.
#[must_use]
pub fn cardinal_cos(degrees: f64) -> f64 {
    if degrees < 0.0 {
        return cardinal_cos(-degrees);
    }
    match degrees {
        d if d == 0.0 || d == 360.0 => 1.0,
        d if d == 90.0 || d == 270.0 => 0.0,
        d if d == 180.0 => -1.0,
        d => d.to_radians().cos(),
    }
}

/// Sine of `degrees`, exact at the four cardinal multiples.
/// Negative angles mirror the sign, matching `sin(-x) = -sin(x)`.
#[must_use]
pub fn cardinal_sin(degrees: f64) -> f64 {
    if degrees < 0.0 {
        return -cardinal_sin(-degrees);
    }
    match degrees {
        d if d == 0.0 || d == 180.0 || d == 360.0 => 0.0,
        d if d == 90.0 => 1.0,
        d if d == 270.0 => -1.0,
        d => d.to_radians().sin(),
    }
}
