//! Drives a simulated DC motor to a velocity setpoint.
//!
//! Run with `RUST_LOG=trace` to see the controller's own diagnostics.

use loopctl::{prelude::*, time::micros_to_seconds};
use tracing_subscriber::EnvFilter;

const DT_MICROS: u64 = 5_000;

struct Motor {
    velocity: f64,
}

impl Motor {
    const GAIN: f64 = 2.0;
    const TIME_CONSTANT: f64 = 0.25;
    const MAX_VOLTAGE: f64 = 12.0;

    fn step(&mut self, voltage: f64, dt: f64) {
        let voltage = voltage.clamp(-Self::MAX_VOLTAGE, Self::MAX_VOLTAGE);
        self.velocity += (Self::GAIN * voltage - self.velocity) * dt / Self::TIME_CONSTANT;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dt = micros_to_seconds(DT_MICROS);

    let mut timing = FixedTimestep::new(DT_MICROS);
    let mut filter = LowPassFilter::from_time_constant(0.02, dt);
    let mut pid = PidController::new(0.6, 2.5, 0.01, 8.0, &mut filter, &mut timing);
    let mut motor = Motor { velocity: 0.0 };

    for cycle in 0..=800 {
        let setpoint = if cycle < 400 { 15.0 } else { 5.0 };
        let voltage = pid.update(setpoint, motor.velocity);
        motor.step(voltage, dt);

        if cycle % 50 == 0 {
            tracing::info!(
                cycle,
                setpoint,
                velocity = motor.velocity,
                voltage,
                integral = pid.integral(),
                derivative = pid.derivative(),
                "motor state"
            );
        }
    }

    pid.reset();
    tracing::info!(integral = pid.integral(), "controller reset");
}
