//! # loopctl
//!
//! `no_std` building blocks for discrete-time control loops: timing services, signal
//! filters and a PID controller with anti-windup and a filtered derivative term.
//!
//! # Usage
//!
//! Create the services the controller depends on, hand them to a
//! [`PidController`](pid::PidController) by mutable reference, and call
//! [`update`](pid::PidController::update) once per control cycle.
//!
//! ```
//! use loopctl::prelude::*;
//!
//! let mut timing = FixedTimestep::new(5_000);
//! let mut filter = MovingAverageFilter::<4>::new();
//! let mut pid = PidController::new(1.2, 0.4, 0.01, 50.0, &mut filter, &mut timing);
//!
//! let mut position = 0.0;
//! for _ in 0..4_000 {
//!     let output = pid.update(1.0, position);
//!     position += output * 0.005;
//! }
//!
//! assert!((position - 1.0_f64).abs() < 0.01);
//! ```
//!
//! # Features
//!
//! - `core` (default): [`time`].
//! - `filters` (default): [`filters`].
//! - `pid` (default): [`pid`].
//! - `std`: a [`Clock`](time::Clock) backed by the operating system, `time::StdClock`.

#![no_std]

/// Utilities for tracking time.
///
/// - [`TimingService`](time::TimingService) reports the time elapsed between control cycles.
/// - [`DeltaTimer`](time::DeltaTimer) measures that time on any [`Clock`](time::Clock).
/// - [`FixedTimestep`](time::FixedTimestep) reports a constant step.
#[cfg(feature = "core")]
pub mod time {
    #[doc(inline)]
    pub use loopctl_core::time::*;
}

#[doc(inline)]
#[cfg(feature = "filters")]
pub use loopctl_filters as filters;

/// PID controllers.
#[cfg(feature = "pid")]
pub mod pid {
    #[doc(inline)]
    pub use loopctl_pid::{error::PidError, pid::*};
}

/// Commonly used features of loopctl.
///
/// This module is meant to be glob imported.
pub mod prelude {
    #[cfg(feature = "filters")]
    pub use crate::filters::{Filter, LowPassFilter, MovingAverageFilter, PassThroughFilter};
    #[cfg(feature = "pid")]
    pub use crate::pid::{PidController, PidError, PidGains};
    #[cfg(feature = "std")]
    pub use crate::time::StdClock;
    #[cfg(feature = "core")]
    pub use crate::time::{Clock, DeltaTimer, FixedTimestep, Instant, TimingService};
}
