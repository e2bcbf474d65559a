use std::fmt::Display;

use crate::{Error, Indicator, IndicatorStream, Ohlcv, Price, Result, ValueIndicator};

/// An indicator computed over another indicator's output.
///
/// Bars go into the upstream indicator; every value it emits is forwarded,
/// on the same bar index, to the downstream indicator. The chain's result
/// stream is the downstream's, so its first value appears on bar
/// `upstream.first_valid_bar() + downstream.lookback() - 1`.
///
/// Chains are indicators themselves and can be nested.
///
/// # Example
///
/// ```
/// use streaming_ta::{
///     Chain, Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder,
///     IndicatorStream, PriceSource, Sma, SmaConfig,
/// };
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
/// let sma = Sma::new(SmaConfig::close(2)?);
/// let ema = Ema::new(
///     EmaConfig::builder()
///         .length(2)
///         .source(PriceSource::Close)
///         .first_bar(sma.first_valid_bar())
///         .build()?,
/// );
/// let mut smoothed = Chain::new(sma, ema)?;
///
/// for (i, close) in [2.0, 4.0, 6.0, 8.0].into_iter().enumerate() {
///     smoothed.receive_tick(&Bar(close, i as u64), i + 1)?;
/// }
///
/// // SMA(2): 3, 5, 7 -> EMA(2) seeded with (3 + 5) / 2 = 4
/// assert_eq!(smoothed.valid_from_bar(), Some(3));
/// assert_eq!(smoothed.values()[0], 4.0);
/// # Ok::<(), streaming_ta::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Chain<U, D> {
    upstream: U,
    downstream: D,
}

impl<U, D> Chain<U, D>
where
    U: Indicator,
    D: ValueIndicator,
{
    /// Connects `downstream` to the output of `upstream`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] when the downstream's first bar is not
    /// the upstream's first valid bar, or when either indicator has already
    /// accepted a bar.
    pub fn new(upstream: U, downstream: D) -> Result<Self> {
        if downstream.first_bar() != upstream.first_valid_bar() {
            return Err(Error::InvalidParameter {
                name: "first_bar",
                reason: "downstream must start on the upstream's first valid bar",
            });
        }

        if upstream.next_bar() != upstream.first_bar() {
            return Err(Error::InvalidParameter {
                name: "upstream",
                reason: "indicators must be chained before they are fed",
            });
        }

        if downstream.next_bar() != downstream.first_bar() {
            return Err(Error::InvalidParameter {
                name: "downstream",
                reason: "indicators must be chained before they are fed",
            });
        }

        Ok(Self {
            upstream,
            downstream,
        })
    }

    /// See [`Indicator::receive_tick`].
    ///
    /// # Errors
    ///
    /// [`Error::OutOfSequence`] when `bar_index` is not the next index.
    #[inline]
    pub fn receive_tick(&mut self, bar: &impl Ohlcv, bar_index: usize) -> Result<()> {
        <Self as Indicator>::receive_tick(self, bar, bar_index)
    }

    /// The indicator fed with bars.
    #[must_use]
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// The indicator fed with the upstream's output.
    #[must_use]
    pub fn downstream(&self) -> &D {
        &self.downstream
    }

    #[inline]
    fn forward(&mut self, emitted_before: usize, bar_index: usize) -> Result<()> {
        if self.upstream.len() == emitted_before {
            return Ok(());
        }

        match self.upstream.last_value() {
            Some(value) => self.downstream.receive_value(value, bar_index),
            None => Ok(()),
        }
    }
}

impl<U, D> Indicator for Chain<U, D>
where
    U: Indicator,
    D: ValueIndicator,
{
    #[inline]
    fn first_bar(&self) -> usize {
        self.upstream.first_bar()
    }

    #[inline]
    fn lookback(&self) -> usize {
        self.upstream.lookback() + self.downstream.lookback() - 1
    }

    #[inline]
    fn next_bar(&self) -> usize {
        self.upstream.next_bar()
    }

    fn receive_tick(&mut self, bar: &impl Ohlcv, bar_index: usize) -> Result<()> {
        let emitted_before = self.upstream.len();
        self.upstream.receive_tick(bar, bar_index)?;
        self.forward(emitted_before, bar_index)
    }
}

impl<U, D> ValueIndicator for Chain<U, D>
where
    U: ValueIndicator,
    D: ValueIndicator,
{
    fn receive_value(&mut self, value: Price, bar_index: usize) -> Result<()> {
        let emitted_before = self.upstream.len();
        self.upstream.receive_value(value, bar_index)?;
        self.forward(emitted_before, bar_index)
    }
}

impl<U, D> IndicatorStream for Chain<U, D>
where
    D: IndicatorStream,
{
    #[inline]
    fn values(&self) -> &[Price] {
        self.downstream.values()
    }

    #[inline]
    fn valid_from_bar(&self) -> Option<usize> {
        self.downstream.valid_from_bar()
    }

    #[inline]
    fn min_value(&self) -> Result<Price> {
        self.downstream.min_value()
    }

    #[inline]
    fn max_value(&self) -> Result<Price> {
        self.downstream.max_value()
    }
}

impl<U: Display, D: Display> Display for Chain<U, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.upstream, self.downstream)
    }
}
