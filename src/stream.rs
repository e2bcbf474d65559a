use crate::{Price, Result, range::RangeTracker};

/// Read-only view over the values an indicator has emitted.
///
/// This is the surface downstream consumers depend on: it is the same for
/// every indicator and is object safe, so heterogeneous indicators can be
/// inspected through `&dyn IndicatorStream`. All methods are pure reads.
///
/// # Example
///
/// ```
/// use streaming_ta::{Ema, EmaConfig, IndicatorStream, Sma, SmaConfig};
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
/// let mut ema = Ema::new(EmaConfig::close(2)?);
/// let mut sma = Sma::new(SmaConfig::close(3)?);
///
/// for (i, close) in [4.0, 8.0, 6.0].into_iter().enumerate() {
///     let bar = Bar(close, i as u64);
///     ema.receive_tick(&bar, i + 1)?;
///     sma.receive_tick(&bar, i + 1)?;
/// }
///
/// let streams: [&dyn IndicatorStream; 2] = [&ema, &sma];
/// let first_valid: Vec<_> = streams.iter().map(|s| s.valid_from_bar()).collect();
/// assert_eq!(first_valid, [Some(2), Some(3)]);
/// # Ok::<(), streaming_ta::Error>(())
/// ```
pub trait IndicatorStream {
    /// Emitted values in emission order.
    fn values(&self) -> &[Price];

    /// Bar index of the first emitted value, or `None` before the
    /// indicator has emitted anything.
    fn valid_from_bar(&self) -> Option<usize>;

    /// Smallest value emitted so far.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyStream`](crate::Error::EmptyStream) when nothing has
    /// been emitted yet.
    fn min_value(&self) -> Result<Price>;

    /// Largest value emitted so far.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyStream`](crate::Error::EmptyStream) when nothing has
    /// been emitted yet.
    fn max_value(&self) -> Result<Price>;

    /// Number of emitted values.
    #[inline]
    fn len(&self) -> usize {
        self.values().len()
    }

    /// `true` while the indicator is still warming up.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recently emitted value.
    #[inline]
    fn last_value(&self) -> Option<Price> {
        self.values().last().copied()
    }
}

/// Flat, append-only result buffer shared by all indicators.
#[derive(Clone, Debug, Default)]
pub(crate) struct ResultStream {
    values: Vec<Price>,
    valid_from_bar: Option<usize>,
    range: RangeTracker,
}

impl ResultStream {
    /// Appends a value emitted on `bar_index`. The first push fixes
    /// `valid_from_bar`.
    #[inline]
    pub(crate) fn push(&mut self, value: Price, bar_index: usize) {
        if self.values.is_empty() {
            self.valid_from_bar = Some(bar_index);
        }
        self.values.push(value);
        self.range.observe(value);
    }
}

impl IndicatorStream for ResultStream {
    #[inline]
    fn values(&self) -> &[Price] {
        &self.values
    }

    #[inline]
    fn valid_from_bar(&self) -> Option<usize> {
        self.valid_from_bar
    }

    #[inline]
    fn min_value(&self) -> Result<Price> {
        self.range.min()
    }

    #[inline]
    fn max_value(&self) -> Result<Price> {
        self.range.max()
    }
}
