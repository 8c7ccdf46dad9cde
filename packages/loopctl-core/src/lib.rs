//! Low level core functionality for [`loopctl`](https://crates.io/crates/loopctl).
//! The core crate is used in all other crates in the loopctl workspace.
//!
//! Included in this crate:
//! - Timing services that report the elapsed time of a control loop: [`time`]
//! - No-std microsecond [`Instant`](time::Instant)s: [`time`]
//!
//! Enable the `std` feature for a clock backed by `std::time::Instant`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod time;
