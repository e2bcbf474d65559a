use std::fmt::{Debug, Display};

use tracing::{debug, trace};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource, Result,
    ValueIndicator, indicator::validate, sequence::BarSequence, stream::ResultStream,
};

/// Configuration for the Exponential Moving Average ([`Ema`])
/// indicator.
///
/// # Example
///
/// ```
/// use streaming_ta::{EmaConfig, IndicatorConfig, IndicatorConfigBuilder, PriceSource};
///
/// let config = EmaConfig::builder()
///     .length(20)
///     .source(PriceSource::HLC3)
///     .build()?;
///
/// assert_eq!(config.length(), 20);
/// assert_eq!(config.first_valid_bar(), 20);
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
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
    first_bar: usize,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
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

impl EmaConfig {
    /// EMA on closing price.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) when
    /// `length` is zero.
    pub fn close(length: usize) -> Result<Self> {
        Self::with_source(length, PriceSource::Close)
    }

    /// EMA on median price: `(high + low) / 2`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) when
    /// `length` is zero.
    pub fn hl2(length: usize) -> Result<Self> {
        Self::with_source(length, PriceSource::HL2)
    }

    /// EMA on average price: `(open + high + low + close) / 4`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) when
    /// `length` is zero.
    pub fn ohlc4(length: usize) -> Result<Self> {
        Self::with_source(length, PriceSource::OHLC4)
    }

    fn with_source(length: usize, source: PriceSource) -> Result<Self> {
        Self::builder().length(length).source(source).build()
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {}", self.length, self.source)?;
        if self.first_bar != 1 {
            write!(f, ", first_bar={}", self.first_bar)?;
        }
        f.write_str(")")
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::indicator::RawConfig> for EmaConfig {
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
impl From<EmaConfig> for crate::indicator::RawConfig {
    fn from(config: EmaConfig) -> Self {
        Self {
            length: config.length,
            source: config.source,
            first_bar: config.first_bar,
        }
    }
}

/// Builder for [`EmaConfig`].
///
/// Length and source must be set before calling
/// [`build`](IndicatorConfigBuilder::build); the first bar defaults to `1`.
pub struct EmaConfigBuilder {
    length: Option<usize>,
    source: Option<PriceSource>,
    first_bar: usize,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: None,
            first_bar: 1,
        }
    }
}

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
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

    fn build(self) -> Result<EmaConfig> {
        let (length, source) = validate(self.length, self.source, self.first_bar)?;

        Ok(EmaConfig {
            length,
            source,
            first_bar: self.first_bar,
        })
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (length + 1)`. Each value is computed as:
///
/// ```text
/// EMA = α × price + (1 − α) × prev_EMA
/// ```
///
/// The first `length` prices are summed to compute an SMA seed,
/// which is the first emitted value. After seeding the EMA runs
/// with O(1) state per tick via a single fused multiply-add.
///
/// # Example
///
/// ```
/// use streaming_ta::{Ema, EmaConfig};
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
/// let mut ema = Ema::new(EmaConfig::close(3)?);
///
/// // Warming up: collecting the SMA seed
/// ema.receive_tick(&Bar(5.0, 1), 1)?;
/// ema.receive_tick(&Bar(6.0, 2), 2)?;
/// assert!(ema.is_empty());
/// assert_eq!(ema.valid_from_bar(), None);
///
/// // Seed = (5 + 6 + 7) / 3 = 6.0
/// ema.receive_tick(&Bar(7.0, 3), 3)?;
/// assert_eq!(ema.last_value(), Some(6.0));
/// assert_eq!(ema.valid_from_bar(), Some(3));
///
/// // α = 0.5: 8 × 0.5 + 6 × 0.5 = 7.0
/// ema.receive_tick(&Bar(8.0, 4), 4)?;
/// assert_eq!(ema.values(), &[6.0, 7.0]);
/// # Ok::<(), streaming_ta::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    alpha: f64,
    sequence: BarSequence,
    seen_bars: usize,
    seed_sum: Price,
    previous: Option<Price>,
    prev_close: Option<Price>,
    pub(crate) stream: ResultStream,
}

impl Ema {
    /// Creates a new EMA from a validated config.
    #[must_use]
    pub fn new(config: EmaConfig) -> Self {
        Self {
            config,
            #[allow(clippy::cast_precision_loss)]
            alpha: 2.0 / (config.length as f64 + 1.0),
            sequence: BarSequence::starting_at(config.first_bar),
            seen_bars: 0,
            seed_sum: 0.0,
            previous: None,
            prev_close: None,
            stream: ResultStream::default(),
        }
    }

    /// The config this EMA was built with.
    #[must_use]
    pub fn config(&self) -> &EmaConfig {
        &self.config
    }

    #[inline]
    fn advance(&mut self, price: Price, bar_index: usize) {
        let value = match self.previous {
            Some(previous) => self.alpha.mul_add(price - previous, previous),
            None => {
                self.seed_sum += price;
                self.seen_bars += 1;
                if self.seen_bars < self.config.length {
                    return;
                }

                debug!(indicator = %self, bar_index, "warm-up complete");
                #[allow(clippy::cast_precision_loss)]
                let length = self.config.length as f64;
                self.seed_sum / length
            }
        };

        self.previous = Some(value);
        self.stream.push(value, bar_index);
        trace!(indicator = %self, bar_index, value, "emitted value");
    }
}

impl Indicator for Ema {
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

impl ValueIndicator for Ema {
    #[inline]
    fn receive_value(&mut self, value: Price, bar_index: usize) -> Result<()> {
        self.sequence.accept(bar_index)?;
        self.advance(value, bar_index);

        Ok(())
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}
