//! Numeric helpers for coordinate conversion and range mapping.

use crate::{Error, Result};

/// Safely truncate an f64 to i32 with bounds checking
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Convert a normalized `[0, 1]` coordinate to a whole-pixel position.
///
/// The fractional part is dropped, so `0.999 * 640` lands on pixel 639.
///
/// # Errors
///
/// Returns an error if the scaled value is not representable as a pixel index
pub fn normalized_to_pixel(value: f32, extent: u32) -> Result<f64> {
    let scaled = f64::from(value) * f64::from(extent);
    f64_to_i32(scaled).map(f64::from)
}

/// Piecewise-linear map of `value` from `from` onto `to`.
///
/// Inputs outside `from` saturate at the matching end of `to`. A degenerate
/// source range maps everything to `to.0`.
#[must_use]
pub fn interp(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let (x0, x1) = from;
    let (y0, y1) = to;
    let span = x1 - x0;
    if span.abs() < f64::EPSILON {
        return y0;
    }
    let t = ((value - x0) / span).clamp(0.0, 1.0);
    y0 + t * (y1 - y0)
}
