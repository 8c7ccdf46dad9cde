//! Errors reported by the validated update path of a PID controller.

use snafu::Snafu;

/// Errors that can occur when calling [`PidController::try_update`](crate::PidController::try_update).
#[derive(Debug, Clone, Copy, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PidError {
    /// The setpoint was NaN or infinite.
    #[snafu(display("setpoint is not a finite number: {setpoint}"))]
    NonFiniteSetpoint {
        /// The rejected setpoint.
        setpoint: f64,
    },

    /// The measured input was NaN or infinite.
    #[snafu(display("input is not a finite number: {input}"))]
    NonFiniteInput {
        /// The rejected input.
        input: f64,
    },

    /// The timing service reported no elapsed time since the previous update.
    #[snafu(display("no time elapsed since the previous update"))]
    ZeroTimestep,

    /// The computed output was NaN or infinite, usually because of misconfigured gains.
    #[snafu(display("controller produced a non-finite output: {output}"))]
    NonFiniteOutput {
        /// The offending output.
        output: f64,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_error<E: core::error::Error + Send + Sync + 'static>() {}

    #[test]
    fn implements_core_error() {
        assert_error::<PidError>();

        let error: &dyn core::error::Error = &PidError::ZeroTimestep;
        assert!(error.source().is_none());
    }
}
