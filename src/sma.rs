use std::fmt::{Debug, Display};

use tracing::{debug, trace};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorStream, Ohlcv, Price,
    PriceSource, Result, ValueIndicator, indicator::validate, sequence::BarSequence,
    stream::ResultStream, window::SumWindow,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use streaming_ta::{IndicatorConfig, SmaConfig};
///
/// let config = SmaConfig::close(20)?;
/// assert_eq!(config.length(), 20);
/// # Ok::<(), streaming_ta::Error>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "crate::indicator::RawConfig",
        into = "crate::indicator::RawConfig"
    )
)]
pub struct SmaConfig {
    length: usize,
    source: PriceSource,
    first_bar: usize,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }

    #[inline]
    fn first_bar(&self) -> usize {
        self.first_bar
    }
}

impl SmaConfig {
    /// SMA on closing price.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) when
    /// `length` is zero.
    pub fn close(length: usize) -> Result<Self> {
        Self::builder()
            .length(length)
            .source(PriceSource::Close)
            .build()
    }

    /// SMA on median price: `(high + low) / 2`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) when
    /// `length` is zero.
    pub fn hl2(length: usize) -> Result<Self> {
        Self::builder()
            .length(length)
            .source(PriceSource::HL2)
            .build()
    }

    /// SMA on average price: `(open + high + low + close) / 4`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) when
    /// `length` is zero.
    pub fn ohlc4(length: usize) -> Result<Self> {
        Self::builder()
            .length(length)
            .source(PriceSource::OHLC4)
            .build()
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {}", self.length, self.source)?;
        if self.first_bar != 1 {
            write!(f, ", first_bar={}", self.first_bar)?;
        }
        f.write_str(")")
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::indicator::RawConfig> for SmaConfig {
    type Error = crate::Error;

    fn try_from(raw: crate::indicator::RawConfig) -> Result<Self> {
        Self::builder()
            .length(raw.length)
            .source(raw.source)
            .first_bar(raw.first_bar)
            .build()
    }
}

#[cfg(feature = "serde")]
impl From<SmaConfig> for crate::indicator::RawConfig {
    fn from(config: SmaConfig) -> Self {
        Self {
            length: config.length,
            source: config.source,
            first_bar: config.first_bar,
        }
    }
}

/// Builder for [`SmaConfig`].
///
/// Length and source are required; the first bar defaults to `1`.
pub struct SmaConfigBuilder {
    length: Option<usize>,
    source: Option<PriceSource>,
    first_bar: usize,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: None,
            first_bar: 1,
        }
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
    #[inline]
    fn length(mut self, length: usize) -> Self {
        self.length.replace(length);
        self
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source.replace(source);
        self
    }

    #[inline]
    fn first_bar(mut self, first_bar: usize) -> Self {
        self.first_bar = first_bar;
        self
    }

    fn build(self) -> Result<SmaConfig> {
        let (length, source) = validate(self.length, self.source, self.first_bar)?;

        Ok(SmaConfig {
            length,
            source,
            first_bar: self.first_bar,
        })
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *n* values, where *n* is the
/// configured window length. Emits nothing until the window is full.
///
/// Uses a running sum for O(1) updates per bar.
///
/// # Example
///
/// ```rust
/// use streaming_ta::{Sma, SmaConfig};
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
/// let mut sma = Sma::new(SmaConfig::close(3)?);
///
/// sma.receive_tick(&Bar(10.0, 1), 1)?;
/// sma.receive_tick(&Bar(20.0, 2), 2)?;
/// assert!(sma.is_empty());
///
/// sma.receive_tick(&Bar(30.0, 3), 3)?;
/// assert_eq!(sma.last_value(), Some(20.0));
/// # Ok::<(), streaming_ta::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    window: SumWindow,
    sequence: BarSequence,
    prev_close: Option<Price>,
    pub(crate) stream: ResultStream,
}

impl Sma {
    /// Creates a new SMA from a validated config.
    #[must_use]
    pub fn new(config: SmaConfig) -> Self {
        Self {
            config,
            window: SumWindow::new(config.length),
            sequence: BarSequence::starting_at(config.first_bar),
            prev_close: None,
            stream: ResultStream::default(),
        }
    }

    /// The config this SMA was built with.
    #[must_use]
    pub fn config(&self) -> &SmaConfig {
        &self.config
    }

    #[inline]
    fn advance(&mut self, price: Price, bar_index: usize) {
        self.window.push(price);

        let Some(sum) = self.window.sum() else {
            return;
        };

        if self.stream.is_empty() {
            debug!(indicator = %self, bar_index, "warm-up complete");
        }

        #[allow(clippy::cast_precision_loss)]
        let value = sum / self.config.length as f64;
        self.stream.push(value, bar_index);
        trace!(indicator = %self, bar_index, value, "emitted value");
    }
}

impl Indicator for Sma {
    #[inline]
    fn first_bar(&self) -> usize {
        self.config.first_bar
    }

    #[inline]
    fn lookback(&self) -> usize {
        self.config.length
    }

    #[inline]
    fn next_bar(&self) -> usize {
        self.sequence.next()
    }

    #[inline]
    fn receive_tick(&mut self, bar: &impl Ohlcv, bar_index: usize) -> Result<()> {
        self.sequence.accept(bar_index)?;

        let price = self.config.source.extract(bar, self.prev_close);
        self.prev_close = Some(bar.close());
        self.advance(price, bar_index);

        Ok(())
    }
}

impl ValueIndicator for Sma {
    #[inline]
    fn receive_value(&mut self, value: Price, bar_index: usize) -> Result<()> {
        self.sequence.accept(bar_index)?;
        self.advance(value, bar_index);

        Ok(())
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length, self.config.source)
    }
}
