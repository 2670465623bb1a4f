//! Shared angle helpers.

use crate::error::JyotishError;

/// Normalize an angle to [0, 360) degrees.
///
/// Tiny negative inputs can round to exactly 360.0 after the shift; those
/// fold back to 0.0 so the half-open range always holds.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    if r >= 360.0 { 0.0 } else { r }
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (normalize_360(a) - normalize_360(b)).abs();
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(value: f64, what: &'static str) -> Result<f64, JyotishError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(JyotishError::InvalidInput(what))
    }
}
