use crate::{Ohlcv, Price};

use std::fmt::{Debug, Display};

/// Caller-supplied selector: a deterministic, side-effect-free mapping from
/// a bar to the scalar an indicator consumes.
pub type Selector = fn(&dyn Ohlcv) -> Price;

/// Value extracted from an [`Ohlcv`] bar before feeding into an indicator.
///
/// Each indicator is configured with a `PriceSource` that determines which
/// value (or derived value) to compute on.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
    /// Weighted close: `(high + low + close + close) / 4`.
    HLCC4,
    /// Traded volume.
    Volume,
    /// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
    ///
    /// On the first bar (no previous close), falls back to `high - low`.
    TrueRange,
    /// Any other mapping, supplied by the caller.
    ///
    /// ```
    /// use streaming_ta::{Ohlcv, PriceSource};
    ///
    /// fn body(bar: &dyn Ohlcv) -> f64 {
    ///     (bar.close() - bar.open()).abs()
    /// }
    ///
    /// let source = PriceSource::Custom(body);
    /// assert_eq!(source.to_string(), "Custom");
    /// ```
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(Selector),
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom"),
            other => write!(f, "{other:?}"),
        }
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv, prev_close: Option<Price>) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Close => ohlcv.close(),
            Self::Low => ohlcv.low(),
            Self::HL2 => f64::midpoint(ohlcv.high(), ohlcv.low()),
            Self::HLC3 => (ohlcv.high() + ohlcv.low() + ohlcv.close()) / 3.0,
            Self::OHLC4 => (ohlcv.open() + ohlcv.high() + ohlcv.low() + ohlcv.close()) / 4.0,
            Self::HLCC4 => (ohlcv.high() + ohlcv.low() + ohlcv.close() + ohlcv.close()) / 4.0,
            Self::Volume => ohlcv.volume(),
            Self::TrueRange => {
                let hl = ohlcv.high() - ohlcv.low();

                match prev_close {
                    Some(prev_close) => {
                        let hc = (ohlcv.high() - prev_close).abs();
                        let lc = (ohlcv.low() - prev_close).abs();
                        hl.max(hc).max(lc)
                    }
                    None => hl,
                }
            }
            Self::Custom(select) => select(ohlcv),
        }
    }
}
