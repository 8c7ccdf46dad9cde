//! Temporal quantification for control loops.
//!
//! A control loop needs to know how much time passed since it last ran. That
//! knowledge is provided through the [`TimingService`] trait, which reports the
//! number of microseconds elapsed since it was last queried.
//!
//! - [`DeltaTimer`] implements [`TimingService`] on top of any monotonic [`Clock`],
//!   such as a hardware timer register or an RTOS tick counter.
//! - [`FixedTimestep`] reports the same step on every query, for fixed-rate loops,
//!   simulations and log replay.
//! - [`StdClock`] is a [`Clock`] backed by the operating system (requires the `std`
//!   feature).

use core::{fmt, time::Duration};

/// The number of microseconds in one second.
pub const MICROS_PER_SECOND: u64 = 1_000_000;

/// Converts a microsecond count, as reported by a [`TimingService`], to seconds.
///
/// # Examples
///
/// ```
/// use loopctl_core::time::micros_to_seconds;
///
/// assert_eq!(micros_to_seconds(1_500_000), 1.5);
/// ```
#[must_use]
pub fn micros_to_seconds(micros: u64) -> f64 {
    micros as f64 / MICROS_PER_SECOND as f64
}

/// A source of elapsed time between successive control loop iterations.
///
/// Every call to [`delta_time`](TimingService::delta_time) consumes the elapsed
/// time: the next call measures from this one.
pub trait TimingService {
    /// Returns the number of microseconds elapsed since the previous call.
    ///
    /// The first call measures from the creation (or restart) of the service.
    fn delta_time(&mut self) -> u64;
}

impl<T: TimingService + ?Sized> TimingService for &mut T {
    fn delta_time(&mut self) -> u64 {
        (**self).delta_time()
    }
}

/// A monotonically nondecreasing microsecond counter.
pub trait Clock {
    /// Returns the current value of the counter in microseconds.
    fn micros(&self) -> u64;

    /// Returns an [`Instant`] corresponding to "now" on this clock.
    fn now(&self) -> Instant {
        Instant::from_micros(self.micros())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn micros(&self) -> u64 {
        (**self).micros()
    }
}

/// Represents a timestamp on a monotonically nondecreasing [`Clock`].
///
/// # Precision
///
/// This type has a precision of 1 microsecond.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(u64);

impl Instant {
    /// Creates an instant from a raw microsecond count.
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Returns the raw microsecond count of this instant.
    #[must_use]
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Returns the amount of time elapsed from another instant to this one,
    /// or zero duration if that instant is later than this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::time::Duration;
    /// use loopctl_core::time::Instant;
    ///
    /// let earlier = Instant::from_micros(1_000);
    /// let later = Instant::from_micros(3_500);
    ///
    /// assert_eq!(later.duration_since(earlier), Duration::from_micros(2_500));
    /// assert_eq!(earlier.duration_since(later), Duration::ZERO);
    /// ```
    #[must_use]
    pub fn duration_since(&self, earlier: Instant) -> Duration {
        self.checked_duration_since(earlier).unwrap_or_default()
    }

    /// Returns the amount of time elapsed from another instant to this one,
    /// or `None` if that instant is later than this one.
    #[must_use]
    pub const fn checked_duration_since(&self, earlier: Instant) -> Option<Duration> {
        match self.0.checked_sub(earlier.0) {
            Some(micros) => Some(Duration::from_micros(micros)),
            None => None,
        }
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Duration::from_micros(self.0).fmt(f)
    }
}

/// A [`TimingService`] that measures the time between queries on a [`Clock`].
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use loopctl_core::time::{Clock, DeltaTimer, TimingService};
///
/// struct TickCounter(Cell<u64>);
///
/// impl Clock for TickCounter {
///     fn micros(&self) -> u64 {
///         self.0.get()
///     }
/// }
///
/// let ticks = TickCounter(Cell::new(0));
/// let mut timer = DeltaTimer::new(&ticks);
///
/// ticks.0.set(2_000);
/// assert_eq!(timer.delta_time(), 2_000);
///
/// ticks.0.set(2_500);
/// assert_eq!(timer.delta_time(), 500);
/// ```
#[derive(Debug, Clone)]
pub struct DeltaTimer<C: Clock> {
    clock: C,
    last_query: Instant,
}

impl<C: Clock> DeltaTimer<C> {
    /// Creates a new timer. The first query measures from this point.
    pub fn new(clock: C) -> Self {
        let last_query = clock.now();
        Self { clock, last_query }
    }

    /// Restarts the measurement, discarding the time elapsed since the last query.
    pub fn restart(&mut self) {
        self.last_query = self.clock.now();
        tracing::trace!(at = ?self.last_query, "timer restarted");
    }

    /// Returns the instant of the most recent query (or of creation/restart).
    pub const fn last_query(&self) -> Instant {
        self.last_query
    }

    /// Returns the time elapsed since the last query without consuming it.
    ///
    /// Reports zero if the clock has gone backwards since then.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().duration_since(self.last_query)
    }

    /// Returns a reference to the underlying clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> TimingService for DeltaTimer<C> {
    fn delta_time(&mut self) -> u64 {
        let now = self.clock.now();
        let elapsed = match now.checked_duration_since(self.last_query) {
            Some(elapsed) => elapsed.as_micros() as u64,
            None => {
                tracing::warn!(
                    last = ?self.last_query,
                    now = ?now,
                    "clock went backwards, reporting zero elapsed time"
                );
                0
            }
        };
        self.last_query = now;
        elapsed
    }
}

/// A [`TimingService`] that reports the same timestep on every query.
///
/// # Examples
///
/// ```
/// use core::time::Duration;
/// use loopctl_core::time::{FixedTimestep, TimingService};
///
/// let mut timing = FixedTimestep::from_duration(Duration::from_millis(10));
///
/// assert_eq!(timing.delta_time(), 10_000);
/// assert_eq!(timing.delta_time(), 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTimestep {
    step: u64,
}

impl FixedTimestep {
    /// Creates a timing service reporting `step` microseconds per query.
    #[must_use]
    pub const fn new(step: u64) -> Self {
        Self { step }
    }

    /// Creates a timing service reporting `step` per query, truncated to whole
    /// microseconds.
    #[must_use]
    pub fn from_duration(step: Duration) -> Self {
        Self::new(step.as_micros().try_into().unwrap_or(u64::MAX))
    }

    /// Returns the reported step in microseconds.
    #[must_use]
    pub const fn step(&self) -> u64 {
        self.step
    }

    /// Changes the reported step.
    pub fn set_step(&mut self, step: u64) {
        self.step = step;
    }
}

impl TimingService for FixedTimestep {
    fn delta_time(&mut self) -> u64 {
        self.step
    }
}

/// A [`Clock`] backed by [`std::time::Instant`], counting from its creation.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a clock whose counter starts at zero now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn micros(&self) -> u64 {
        self.epoch.elapsed().as_micros().try_into().unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod test {
    use core::cell::Cell;

    use super::*;

    struct ManualClock(Cell<u64>);

    impl Clock for ManualClock {
        fn micros(&self) -> u64 {
            self.0.get()
        }
    }

    #[test]
    fn converts_micros_to_seconds() {
        assert_eq!(micros_to_seconds(0), 0.0);
        assert_eq!(micros_to_seconds(1_000_000), 1.0);
        assert_eq!(micros_to_seconds(250), 0.000_25);
    }

    #[test]
    fn delta_timer_measures_between_queries() {
        let clock = ManualClock(Cell::new(100));
        let mut timer = DeltaTimer::new(&clock);

        clock.0.set(1_100);
        assert_eq!(timer.delta_time(), 1_000);
        assert_eq!(timer.delta_time(), 0);

        clock.0.set(1_350);
        assert_eq!(timer.delta_time(), 250);
        assert_eq!(timer.last_query(), Instant::from_micros(1_350));
    }

    #[test]
    fn delta_timer_saturates_on_backwards_clock() {
        let clock = ManualClock(Cell::new(5_000));
        let mut timer = DeltaTimer::new(&clock);

        clock.0.set(4_000);
        assert_eq!(timer.delta_time(), 0);

        clock.0.set(4_500);
        assert_eq!(timer.delta_time(), 500);
    }

    #[test]
    fn delta_timer_restart_discards_elapsed_time() {
        let clock = ManualClock(Cell::new(0));
        let mut timer = DeltaTimer::new(&clock);

        clock.0.set(10_000);
        timer.restart();
        clock.0.set(10_400);
        assert_eq!(timer.delta_time(), 400);
    }

    #[test]
    fn fixed_timestep_is_constant() {
        let mut timing = FixedTimestep::new(1_000_000);
        for _ in 0..3 {
            assert_eq!(timing.delta_time(), 1_000_000);
        }

        timing.set_step(0);
        assert_eq!(timing.delta_time(), 0);
    }

    #[test]
    fn borrowed_timing_service_advances_owner() {
        fn query<T: TimingService>(mut timing: T) -> u64 {
            timing.delta_time()
        }

        let clock = ManualClock(Cell::new(0));
        let mut timer = DeltaTimer::new(&clock);

        clock.0.set(700);
        assert_eq!(query(&mut timer), 700);
        assert_eq!(timer.last_query(), Instant::from_micros(700));
    }

    #[test]
    fn instant_durations_saturate() {
        let start = Instant::from_micros(1_000);
        let later = Instant::from_micros(3_000);

        assert_eq!(later.duration_since(start), Duration::from_millis(2));
        assert_eq!(start.duration_since(later), Duration::ZERO);
        assert_eq!(later.checked_duration_since(start), Some(Duration::from_millis(2)));
        assert_eq!(start.checked_duration_since(later), None);
    }

    #[test]
    fn delta_timer_elapsed_does_not_consume() {
        let clock = ManualClock(Cell::new(1_000));
        let mut timer = DeltaTimer::new(&clock);

        clock.0.set(1_750);
        assert_eq!(timer.elapsed(), Duration::from_micros(750));
        assert_eq!(timer.elapsed(), Duration::from_micros(750));
        assert_eq!(timer.delta_time(), 750);
        assert_eq!(timer.elapsed(), Duration::ZERO);

        clock.0.set(1_500);
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }
}

#[cfg(all(test, feature = "std"))]
mod std_test {
    use super::*;

    #[test]
    fn std_clock_is_monotonic() {
        let clock = StdClock::new();
        let mut timer = DeltaTimer::new(clock);

        let first = clock.now();
        timer.delta_time();
        assert!(clock.now() >= first);
        assert!(timer.last_query() >= first);
    }
}
