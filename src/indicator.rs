use crate::{Error, IndicatorStream, Ohlcv, Price, PriceSource, Result};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (length, price source, first bar index). Configs are value types: cheap to
/// copy, compare, and hash. A config that exists has passed validation.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Lookback period: bars required before the first value is emitted.
    fn length(&self) -> usize;

    /// Price source to extract from each bar.
    fn source(&self) -> &PriceSource;

    /// Index of the first bar the indicator accepts. Defaults to `1`.
    fn first_bar(&self) -> usize;

    /// Index of the bar on which the first value is emitted.
    #[inline]
    fn first_valid_bar(&self) -> usize {
        self.first_bar() + self.length() - 1
    }
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the lookback period.
    #[must_use]
    fn length(self, length: usize) -> Self;

    /// Sets the price source.
    #[must_use]
    fn source(self, source: PriceSource) -> Self;

    /// Sets the index of the first bar the indicator accepts.
    ///
    /// Only needed when the indicator consumes another indicator's output,
    /// which starts at that indicator's first valid bar.
    #[must_use]
    fn first_bar(self, first_bar: usize) -> Self;

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] when the length is missing or zero, the
    /// source is missing, the first bar index is zero, or the first valid
    /// bar index would not fit in a `usize`.
    fn build(self) -> Result<Config>;
}

/// A streaming technical indicator.
///
/// Indicators are fed one bar at a time through
/// [`receive_tick`](Indicator::receive_tick) with strictly consecutive bar
/// indices. Nothing is emitted while the indicator warms up; afterwards every
/// accepted tick appends exactly one value to the indicator's
/// [`IndicatorStream`].
///
/// # Example
///
/// ```
/// use streaming_ta::{Ema, EmaConfig, Indicator, IndicatorStream};
/// # use streaming_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// fn feed(indicator: &mut impl Indicator, closes: &[f64]) -> streaming_ta::Result<()> {
///     for (i, &close) in closes.iter().enumerate() {
///         indicator.receive_tick(&Bar(close, i as u64), i + 1)?;
///     }
///     Ok(())
/// }
///
/// let mut ema = Ema::new(EmaConfig::close(3)?);
/// feed(&mut ema, &[5.0, 6.0, 7.0, 8.0, 9.0])?;
///
/// assert_eq!(ema.values(), &[6.0, 7.0, 8.0]);
/// assert_eq!(ema.valid_from_bar(), Some(3));
/// # Ok::<(), streaming_ta::Error>(())
/// ```
pub trait Indicator: IndicatorStream + Sized + Clone + Display + Debug {
    /// Index of the first bar this indicator accepts.
    fn first_bar(&self) -> usize;

    /// Bars required before the first value is emitted.
    fn lookback(&self) -> usize;

    /// Index of the bar on which the first value is (or will be) emitted.
    #[inline]
    fn first_valid_bar(&self) -> usize {
        self.first_bar() + self.lookback() - 1
    }

    /// Index the next accepted bar must carry. Equals
    /// [`first_bar`](Indicator::first_bar) until a bar has been accepted.
    fn next_bar(&self) -> usize;

    /// Feeds the bar at `bar_index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfSequence`] when `bar_index` is not the immediate
    /// successor of the last accepted index. The tick is then ignored.
    fn receive_tick(&mut self, bar: &impl Ohlcv, bar_index: usize) -> Result<()>;
}

/// An [`Indicator`] that can also consume bare scalar values, such as the
/// output of another indicator.
pub trait ValueIndicator: Indicator {
    /// Feeds `value` as the input for `bar_index`, bypassing the price source.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfSequence`] under the same rule as
    /// [`receive_tick`](Indicator::receive_tick).
    fn receive_value(&mut self, value: Price, bar_index: usize) -> Result<()>;
}

/// Validates builder fields shared by every indicator config.
pub(crate) fn validate(
    length: Option<usize>,
    source: Option<PriceSource>,
    first_bar: usize,
) -> Result<(usize, PriceSource)> {
    let length = match length {
        None => {
            return Err(Error::InvalidParameter {
                name: "length",
                reason: "length is required",
            });
        }
        Some(0) => {
            return Err(Error::InvalidParameter {
                name: "length",
                reason: "length must be at least 1",
            });
        }
        Some(length) => length,
    };

    let source = source.ok_or(Error::InvalidParameter {
        name: "source",
        reason: "price source is required",
    })?;

    if first_bar == 0 {
        return Err(Error::InvalidParameter {
            name: "first_bar",
            reason: "bar indices start at 1",
        });
    }

    if first_bar.checked_add(length).is_none() {
        return Err(Error::InvalidParameter {
            name: "length",
            reason: "first valid bar index exceeds usize::MAX",
        });
    }

    Ok((length, source))
}

/// Wire form of a config; deserialization goes through the builder so
/// invalid documents are rejected.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct RawConfig {
    pub(crate) length: usize,
    pub(crate) source: PriceSource,
    #[serde(default = "RawConfig::default_first_bar")]
    pub(crate) first_bar: usize,
}

#[cfg(feature = "serde")]
impl RawConfig {
    fn default_first_bar() -> usize {
        1
    }
}
