//! Optional smoothing for the pinch distance signal.
//!
//! Landmark jitter makes the raw thumb-index distance flicker around the
//! volume thresholds. These filters trade a little latency for a steadier
//! signal. The default is no filtering.

/// Moving average filter over a fixed window
pub mod moving_average;

/// Exponential smoothing filter
pub mod exponential;

use crate::{
    constants::{DEFAULT_EXPONENTIAL_ALPHA, DEFAULT_MOVING_AVERAGE_WINDOW},
    Error, Result,
};

/// Trait for all pinch filters
pub trait PinchFilter: Send + Sync {
    /// Feed one sample and return the smoothed value
    fn apply(&mut self, value: f64) -> f64;

    /// Forget all history
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes values through unchanged
pub struct NoFilter;

impl PinchFilter for NoFilter {
    fn apply(&mut self, value: f64) -> f64 {
        value
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a pinch filter from a descriptor such as `none`, `exponential:0.3` or `moving_average:7`
///
/// # Errors
///
/// Returns `Error::ConfigError` for unknown names or out-of-range parameters.
pub fn create_filter(descriptor: &str) -> Result<Box<dyn PinchFilter>> {
    let mut parts = descriptor.trim().split(':');
    let name = parts.next().unwrap_or_default().to_lowercase();
    let param = parts.next();
    if parts.next().is_some() {
        return Err(Error::ConfigError(format!("Too many filter parameters: {descriptor}")));
    }

    match name.as_str() {
        "none" | "nofilter" | "" => match param {
            None => Ok(Box::new(NoFilter)),
            Some(_) => Err(Error::ConfigError(format!("Filter 'none' takes no parameters: {descriptor}"))),
        },
        "exponential" => {
            let alpha = parse_param(param, DEFAULT_EXPONENTIAL_ALPHA, descriptor)?;
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::ConfigError(format!("Alpha must be in (0, 1]: {descriptor}")));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        "moving_average" | "movingaverage" => {
            let window = parse_param(param, DEFAULT_MOVING_AVERAGE_WINDOW, descriptor)?;
            if window == 0 {
                return Err(Error::ConfigError(format!("Window size must be greater than 0: {descriptor}")));
            }
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        _ => Err(Error::ConfigError(format!("Unknown filter type: {descriptor}"))),
    }
}

fn parse_param<T: std::str::FromStr>(param: Option<&str>, default: T, descriptor: &str) -> Result<T> {
    match param {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::ConfigError(format!("Invalid filter parameter '{raw}' in {descriptor}"))),
    }
}
