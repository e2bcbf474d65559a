use crate::{Error, Price, Result};

/// Running minimum and maximum over every value an indicator has emitted.
///
/// Updated once per emission; after any number of observations the bounds
/// equal a full scan of the emitted values with [`f64::min`] / [`f64::max`]
/// (so a `NaN` never displaces an existing bound).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct RangeTracker {
    bounds: Option<(Price, Price)>,
}

impl RangeTracker {
    #[inline]
    pub(crate) fn observe(&mut self, value: Price) {
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    #[inline]
    pub(crate) fn min(&self) -> Result<Price> {
        self.bounds.map(|(min, _)| min).ok_or(Error::EmptyStream)
    }

    #[inline]
    pub(crate) fn max(&self) -> Result<Price> {
        self.bounds.map(|(_, max)| max).ok_or(Error::EmptyStream)
    }
}
