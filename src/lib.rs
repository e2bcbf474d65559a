//! Streaming technical analysis indicators for Rust.
//!
//! Indicators accept any type implementing [`Ohlcv`], one bar at a time,
//! together with a strictly consecutive bar index. Nothing is emitted while
//! an indicator warms up; afterwards each accepted bar appends exactly one
//! value to the indicator's result stream.
//!
//! Each indicator type ([`Sma`], [`Ema`]) exposes [`new`](Ema::new),
//! [`receive_tick`](Ema::receive_tick) and the [`IndicatorStream`] queries as
//! inherent methods, so no trait import is needed. Import [`Indicator`] and
//! [`IndicatorStream`] for generic code, and use [`Chain`] to compute an
//! indicator over another indicator's output.
//!
//! Indicators log through [`tracing`]: `debug` when warm-up completes or a
//! tick is rejected, `trace` for every emitted value.

mod chain;
mod ema;
mod error;
mod indicator;
mod ohlcv;
mod price_source;
mod range;
mod sequence;
mod sma;
mod stream;
mod window;

pub use crate::error::{Error, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder, ValueIndicator};
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_source::{PriceSource, Selector};
pub use crate::stream::IndicatorStream;

pub use crate::chain::Chain;
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty) => {
        impl $type {
            /// See [`Indicator::receive_tick`].
            ///
            /// # Errors
            ///
            /// [`Error::OutOfSequence`] when `bar_index` is not the next index.
            #[inline]
            pub fn receive_tick(&mut self, bar: &impl Ohlcv, bar_index: usize) -> Result<()> {
                <Self as Indicator>::receive_tick(self, bar, bar_index)
            }

            /// See [`ValueIndicator::receive_value`].
            ///
            /// # Errors
            ///
            /// [`Error::OutOfSequence`] when `bar_index` is not the next index.
            #[inline]
            pub fn receive_value(&mut self, value: Price, bar_index: usize) -> Result<()> {
                <Self as ValueIndicator>::receive_value(self, value, bar_index)
            }

            /// See [`IndicatorStream::values`].
            #[must_use]
            #[inline]
            pub fn values(&self) -> &[Price] {
                <Self as IndicatorStream>::values(self)
            }

            /// See [`IndicatorStream::len`].
            #[must_use]
            #[inline]
            pub fn len(&self) -> usize {
                <Self as IndicatorStream>::len(self)
            }

            /// See [`IndicatorStream::is_empty`].
            #[must_use]
            #[inline]
            pub fn is_empty(&self) -> bool {
                <Self as IndicatorStream>::is_empty(self)
            }

            /// See [`IndicatorStream::valid_from_bar`].
            #[must_use]
            #[inline]
            pub fn valid_from_bar(&self) -> Option<usize> {
                <Self as IndicatorStream>::valid_from_bar(self)
            }

            /// See [`IndicatorStream::min_value`].
            ///
            /// # Errors
            ///
            /// [`Error::EmptyStream`] before the first emission.
            #[inline]
            pub fn min_value(&self) -> Result<Price> {
                <Self as IndicatorStream>::min_value(self)
            }

            /// See [`IndicatorStream::max_value`].
            ///
            /// # Errors
            ///
            /// [`Error::EmptyStream`] before the first emission.
            #[inline]
            pub fn max_value(&self) -> Result<Price> {
                <Self as IndicatorStream>::max_value(self)
            }

            /// See [`IndicatorStream::last_value`].
            #[must_use]
            #[inline]
            pub fn last_value(&self) -> Option<Price> {
                <Self as IndicatorStream>::last_value(self)
            }
        }

        impl IndicatorStream for $type {
            #[inline]
            fn values(&self) -> &[Price] {
                self.stream.values()
            }

            #[inline]
            fn valid_from_bar(&self) -> Option<usize> {
                self.stream.valid_from_bar()
            }

            #[inline]
            fn min_value(&self) -> Result<Price> {
                self.stream.min_value()
            }

            #[inline]
            fn max_value(&self) -> Result<Price> {
                self.stream.max_value()
            }
        }
    };
}

impl_indicator_methods!(Sma);
impl_indicator_methods!(Ema);

#[cfg(test)]
mod test_util;
