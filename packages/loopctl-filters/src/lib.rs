//! Signal smoothing filters for [`loopctl`](https://crates.io/crates/loopctl).
//!
//! Every filter implements the [`Filter`] trait, so smoothing strategies can be swapped
//! without touching the code that consumes the smoothed signal (such as the derivative
//! term of a PID controller).
//!
//! - [`PassThroughFilter`] returns its input unchanged.
//! - [`MovingAverageFilter`] averages the most recent `N` samples.
//! - [`LowPassFilter`] is a first-order exponential smoother.

#![no_std]

pub mod low_pass;
pub mod moving_average;
pub mod pass_through;

pub use low_pass::LowPassFilter;
pub use moving_average::MovingAverageFilter;
pub use pass_through::PassThroughFilter;

/// A stateful filter over a stream of samples.
///
/// Filters start out (and return to, after [`reset`](Filter::reset)) with an
/// [`output`](Filter::output) of `0.0`.
pub trait Filter {
    /// Feeds a new raw sample into the filter and returns the smoothed value.
    fn update(&mut self, value: f64) -> f64;

    /// Discards all accumulated state.
    fn reset(&mut self);

    /// Returns the most recent smoothed value without recomputing it.
    fn output(&self) -> f64;
}

impl<F: Filter + ?Sized> Filter for &mut F {
    fn update(&mut self, value: f64) -> f64 {
        (**self).update(value)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn output(&self) -> f64 {
        (**self).output()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn feed<F: Filter>(mut filter: F, samples: &[f64]) -> f64 {
        for &sample in samples {
            filter.update(sample);
        }
        filter.output()
    }

    #[test]
    fn borrowed_filter_updates_owner() {
        let mut filter = MovingAverageFilter::<2>::new();

        assert_eq!(feed(&mut filter, &[1.0, 3.0]), 2.0);
        assert_eq!(filter.output(), 2.0);
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn trait_objects_are_filters() {
        let mut low_pass = LowPassFilter::new(0.5);
        let dynamic: &mut dyn Filter = &mut low_pass;

        assert_eq!(feed(dynamic, &[4.0, 0.0]), 2.0);
        assert_eq!(low_pass.output(), 2.0);
    }
}
