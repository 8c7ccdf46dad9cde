//! PID control for [`loopctl`](https://crates.io/crates/loopctl).
//!
//! A [`PidController`] turns a setpoint and a measured input into a corrective output. It
//! reads the loop timestep from a [`TimingService`](loopctl_core::time::TimingService) and
//! smooths its derivative term through a [`Filter`](loopctl_filters::Filter).

#![no_std]

pub mod error;
pub mod pid;

pub use error::PidError;
pub use pid::{PidController, PidGains};
