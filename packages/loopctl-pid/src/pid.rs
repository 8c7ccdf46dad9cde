//! PID controllers.
//!
//! PID controllers are first created with [`PidController::new`]
//! and then can be utilized by calling [`PidController::update`] once per control cycle.
//!
//! The controller does not own the services it depends on. Pass the timing service and the
//! derivative filter by mutable reference to keep them in the caller's hands:
//!
//! ```
//! use loopctl_core::time::FixedTimestep;
//! use loopctl_filters::{Filter, LowPassFilter};
//! use loopctl_pid::PidController;
//!
//! let mut timing = FixedTimestep::new(10_000); // 10ms loop
//! let mut filter = LowPassFilter::new(0.2);
//!
//! let mut pid = PidController::new(0.8, 0.2, 0.05, 10.0, &mut filter, &mut timing);
//! let output = pid.update(100.0, 90.0);
//! assert!(output > 0.0);
//!
//! // The controller only borrowed the filter, which now holds the first derivative sample.
//! drop(pid);
//! assert!(filter.output() > 0.0);
//! ```

use loopctl_core::time::{micros_to_seconds, TimingService};
use loopctl_filters::Filter;
use num::traits::float::FloatCore;
use snafu::ensure;

use crate::error::{
    NonFiniteInputSnafu, NonFiniteOutputSnafu, NonFiniteSetpointSnafu, PidError,
    ZeroTimestepSnafu,
};

/// Proportional, integral and derivative gains of a [`PidController`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidGains {
    /// Proportional constant. This is multiplied by the error to get the
    /// proportional component of the output.
    pub kp: f64,
    /// Integral constant. This accounts for the past values of the error.
    pub ki: f64,
    /// Derivative constant. This allows you to change the output
    /// based on the rate of change of the error (predicting future values).
    pub kd: f64,
}

impl PidGains {
    /// Creates a new set of gains.
    #[must_use]
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

/// A proportional–integral–derivative controller.
///
/// The integral term is hard-clamped to `[-max_integral, max_integral]` after every update,
/// preventing windup during sustained error. The derivative term is estimated from the change
/// in error over the timestep and smoothed by the derivative filter `D`. The timestep is read
/// from the timing service `T`.
///
/// # Zero timesteps
///
/// When the timing service reports that no time has elapsed, the controller does not divide by
/// zero. The integral is left untouched, the derivative filter is not fed, the previously
/// filtered derivative is reused, and the previous error is kept so the error change is
/// attributed to the next non-zero timestep.
#[derive(Debug)]
pub struct PidController<D: Filter, T: TimingService> {
    kp: f64,
    ki: f64,
    kd: f64,
    max_integral: f64,

    integral: f64,
    previous_error: f64,

    derivative_filter: D,
    timing_service: T,
}

impl<D: Filter, T: TimingService> PidController<D, T> {
    /// Create a new PID controller with the given constants and services.
    ///
    /// `max_integral` bounds the magnitude of the accumulated integral. A negative bound is
    /// treated as its absolute value.
    pub fn new(
        kp: f64,
        ki: f64,
        kd: f64,
        max_integral: f64,
        derivative_filter: D,
        timing_service: T,
    ) -> Self {
        Self {
            kp,
            ki,
            kd,
            max_integral: FloatCore::abs(max_integral),
            integral: 0.0,
            previous_error: 0.0,
            derivative_filter,
            timing_service,
        }
    }

    /// Create a new PID controller from a set of [`PidGains`].
    pub fn from_gains(
        gains: PidGains,
        max_integral: f64,
        derivative_filter: D,
        timing_service: T,
    ) -> Self {
        Self::new(
            gains.kp,
            gains.ki,
            gains.kd,
            max_integral,
            derivative_filter,
            timing_service,
        )
    }

    /// Update the PID controller with the current setpoint and input, returning the
    /// control output.
    ///
    /// Numeric anomalies such as NaN inputs are not detected; they propagate into the output
    /// and the controller state until [`reset`](Self::reset) is called. Use
    /// [`try_update`](Self::try_update) to reject them instead.
    pub fn update(&mut self, setpoint: f64, input: f64) -> f64 {
        let dt = micros_to_seconds(self.timing_service.delta_time());
        self.step(setpoint - input, dt)
    }

    /// Update the PID controller like [`update`](Self::update), validating the inputs and
    /// the result.
    ///
    /// # Errors
    ///
    /// - [`PidError::NonFiniteSetpoint`] or [`PidError::NonFiniteInput`] if either argument is
    ///   NaN or infinite. The timing service is not queried and no state changes.
    /// - [`PidError::ZeroTimestep`] if no time elapsed since the previous query. The timing
    ///   service has been queried, but the controller state is unchanged.
    /// - [`PidError::NonFiniteOutput`] if the computed output is not finite. The controller
    ///   state has already been advanced, exactly as [`update`](Self::update) would.
    pub fn try_update(&mut self, setpoint: f64, input: f64) -> Result<f64, PidError> {
        ensure!(setpoint.is_finite(), NonFiniteSetpointSnafu { setpoint });
        ensure!(input.is_finite(), NonFiniteInputSnafu { input });

        let dt = micros_to_seconds(self.timing_service.delta_time());
        ensure!(dt > 0.0, ZeroTimestepSnafu);

        let output = self.step(setpoint - input, dt);
        ensure!(output.is_finite(), NonFiniteOutputSnafu { output });

        Ok(output)
    }

    fn step(&mut self, error: f64, dt: f64) -> f64 {
        let derivative = if dt > 0.0 {
            self.integral = clamp_symmetric(self.integral + error * dt, self.max_integral);

            let raw_derivative = (error - self.previous_error) / dt;
            self.previous_error = error;
            self.derivative_filter.update(raw_derivative)
        } else {
            tracing::warn!(error, "zero timestep, reusing previous derivative");
            self.derivative_filter.output()
        };

        self.kp * error + self.ki * self.integral + self.kd * derivative
    }

    /// Clears the accumulated integral, the previous error and the derivative filter.
    ///
    /// Gains are preserved. The timing service is not touched.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = 0.0;
        self.derivative_filter.reset();
        tracing::trace!("pid controller reset");
    }

    /// Returns the proportional gain.
    pub const fn kp(&self) -> f64 {
        self.kp
    }

    /// Returns the integral gain.
    pub const fn ki(&self) -> f64 {
        self.ki
    }

    /// Returns the derivative gain.
    pub const fn kd(&self) -> f64 {
        self.kd
    }

    /// Returns all three gains.
    pub const fn gains(&self) -> PidGains {
        PidGains::new(self.kp, self.ki, self.kd)
    }

    /// Returns the bound on the magnitude of the accumulated integral.
    pub const fn max_integral(&self) -> f64 {
        self.max_integral
    }

    /// Returns the accumulated integral of the error.
    pub const fn integral(&self) -> f64 {
        self.integral
    }

    /// Returns the error computed by the most recent update that took a derivative sample.
    pub const fn previous_error(&self) -> f64 {
        self.previous_error
    }

    /// Returns the most recent filtered derivative of the error.
    ///
    /// This is the derivative filter's output, not a raw finite difference.
    pub fn derivative(&self) -> f64 {
        self.derivative_filter.output()
    }

    /// Returns a reference to the derivative filter.
    pub const fn filter(&self) -> &D {
        &self.derivative_filter
    }

    /// Returns a reference to the timing service.
    pub const fn timing(&self) -> &T {
        &self.timing_service
    }

    /// Sets the proportional gain.
    pub fn set_kp(&mut self, kp: f64) {
        self.kp = kp;
    }

    /// Sets the integral gain.
    pub fn set_ki(&mut self, ki: f64) {
        self.ki = ki;
    }

    /// Sets the derivative gain.
    pub fn set_kd(&mut self, kd: f64) {
        self.kd = kd;
    }

    /// Replaces all three gains.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.kp = gains.kp;
        self.ki = gains.ki;
        self.kd = gains.kd;
    }
}

// Comparisons instead of `f64::clamp`, which panics on a NaN bound.
fn clamp_symmetric(value: f64, limit: f64) -> f64 {
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}
