//! Moving average filter.

use crate::Filter;

/// A [`Filter`] returning the arithmetic mean of the most recent `N` samples.
///
/// Samples are kept in a fixed-size ring buffer, so the filter never allocates.
/// Until `N` samples have been seen, the mean is taken over the samples seen so far.
///
/// # Examples
///
/// ```
/// use loopctl_filters::{Filter, MovingAverageFilter};
///
/// let mut filter = MovingAverageFilter::<3>::new();
///
/// assert_eq!(filter.update(3.0), 3.0);
/// assert_eq!(filter.update(6.0), 4.5);
/// assert_eq!(filter.update(9.0), 6.0);
/// // The first sample falls out of the window.
/// assert_eq!(filter.update(12.0), 9.0);
/// ```
///
/// A window of zero samples is rejected at compile time:
///
/// ```compile_fail
/// let filter = loopctl_filters::MovingAverageFilter::<0>::new();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageFilter<const N: usize> {
    samples: [f64; N],
    head: usize,
    len: usize,
    output: f64,
}

impl<const N: usize> MovingAverageFilter<N> {
    const NONZERO_WINDOW: () = assert!(
        N > 0,
        "moving average window must hold at least one sample"
    );

    /// Creates an empty moving average filter.
    #[must_use]
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_WINDOW;

        Self {
            samples: [0.0; N],
            head: 0,
            len: 0,
            output: 0.0,
        }
    }

    /// Returns the number of samples currently in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no samples have been seen since creation or the last reset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` once the window holds `N` samples.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns the window size.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for MovingAverageFilter<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Filter for MovingAverageFilter<N> {
    fn update(&mut self, value: f64) -> f64 {
        self.samples[self.head] = value;
        self.head = (self.head + 1) % N;
        if self.len < N {
            self.len += 1;
        }

        // While filling, the valid samples are exactly the first `len` slots.
        let sum: f64 = self.samples[..self.len].iter().sum();
        self.output = sum / self.len as f64;
        self.output
    }

    fn reset(&mut self) {
        self.samples = [0.0; N];
        self.head = 0;
        self.len = 0;
        self.output = 0.0;
    }

    fn output(&self) -> f64 {
        self.output
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn averages_partial_window() {
        let mut filter = MovingAverageFilter::<4>::new();

        assert!(filter.is_empty());
        assert_eq!(filter.update(2.0), 2.0);
        assert_eq!(filter.update(4.0), 3.0);
        assert_eq!(filter.len(), 2);
        assert!(!filter.is_full());
    }

    #[test]
    fn drops_oldest_sample_when_full() {
        let mut filter = MovingAverageFilter::<2>::new();

        filter.update(1.0);
        filter.update(3.0);
        assert!(filter.is_full());
        assert_eq!(filter.update(5.0), 4.0);
        assert_eq!(filter.update(7.0), 6.0);
        assert_eq!(filter.output(), 6.0);
        assert_eq!(filter.capacity(), 2);
    }

    #[test]
    fn single_sample_window_is_identity() {
        let mut filter = MovingAverageFilter::<1>::new();

        assert_eq!(filter.update(8.0), 8.0);
        assert_eq!(filter.update(-1.0), -1.0);
    }

    #[test]
    fn smooths_alternating_noise() {
        let mut filter = MovingAverageFilter::<4>::new();

        for i in 0..20 {
            let noise = if i % 2 == 0 { 1.0 } else { -1.0 };
            filter.update(10.0 + noise);
        }

        assert_eq!(filter.output(), 10.0);
    }

    #[test]
    fn reset_forgets_history() {
        let mut filter = MovingAverageFilter::<3>::new();

        filter.update(100.0);
        filter.update(200.0);
        filter.reset();

        assert_eq!(filter.output(), 0.0);
        assert!(filter.is_empty());
        assert_eq!(filter.update(6.0), 6.0);
    }
}
