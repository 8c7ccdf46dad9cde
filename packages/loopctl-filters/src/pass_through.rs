//! Identity filter.

use crate::Filter;

/// A [`Filter`] that performs no smoothing.
///
/// Useful when a consumer requires a filter but the signal is already clean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassThroughFilter {
    output: f64,
}

impl PassThroughFilter {
    /// Creates a new pass-through filter.
    #[must_use]
    pub const fn new() -> Self {
        Self { output: 0.0 }
    }
}

impl Filter for PassThroughFilter {
    fn update(&mut self, value: f64) -> f64 {
        self.output = value;
        value
    }

    fn reset(&mut self) {
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
    fn returns_input_unchanged() {
        let mut filter = PassThroughFilter::new();

        assert_eq!(filter.output(), 0.0);
        assert_eq!(filter.update(3.5), 3.5);
        assert_eq!(filter.update(-12.0), -12.0);
        assert_eq!(filter.output(), -12.0);

        filter.reset();
        assert_eq!(filter.output(), 0.0);
    }
}
