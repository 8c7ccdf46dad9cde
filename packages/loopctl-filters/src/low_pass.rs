//! First-order low-pass filter.
//!
//! Implements exponential smoothing: `y = y + alpha * (x - y)`. A smoothing factor
//! close to `1.0` tracks the input closely, while one close to `0.0` rejects more
//! noise at the cost of lag.

use crate::Filter;

/// A first-order exponential [`Filter`].
///
/// The first sample after creation or a reset initializes the output directly, so
/// the filter does not have to ramp up from zero.
///
/// # Examples
///
/// ```
/// use loopctl_filters::{Filter, LowPassFilter};
///
/// let mut filter = LowPassFilter::new(0.25);
///
/// assert_eq!(filter.update(8.0), 8.0);
/// assert_eq!(filter.update(0.0), 6.0);
/// assert_eq!(filter.update(0.0), 4.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    alpha: f64,
    output: f64,
    primed: bool,
}

impl LowPassFilter {
    /// Creates a new low-pass filter with the given smoothing factor.
    ///
    /// `alpha` is clamped to `[0.0, 1.0]`. A NaN smoothing factor disables smoothing
    /// (behaves as `1.0`).
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: sanitize_alpha(alpha),
            output: 0.0,
            primed: false,
        }
    }

    /// Creates a low-pass filter from a time constant and the period at which samples
    /// arrive, both in seconds.
    ///
    /// The smoothing factor is `sample_period / (sample_period + time_constant)`.
    #[must_use]
    pub fn from_time_constant(time_constant: f64, sample_period: f64) -> Self {
        Self::new(sample_period / (sample_period + time_constant))
    }

    /// Returns the smoothing factor.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Changes the smoothing factor without discarding the current output.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = sanitize_alpha(alpha);
    }
}

fn sanitize_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        tracing::warn!("NaN smoothing factor, disabling smoothing");
        return 1.0;
    }
    if !(0.0..=1.0).contains(&alpha) {
        tracing::warn!(alpha, "smoothing factor outside [0, 1], clamping");
    }
    alpha.clamp(0.0, 1.0)
}

impl Filter for LowPassFilter {
    fn update(&mut self, value: f64) -> f64 {
        if self.primed {
            self.output += self.alpha * (value - self.output);
        } else {
            self.output = value;
            self.primed = true;
        }
        self.output
    }

    fn reset(&mut self) {
        self.output = 0.0;
        self.primed = false;
    }

    fn output(&self) -> f64 {
        self.output
    }
}
