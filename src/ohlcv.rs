/// A price value.
///
/// Semantic alias for [`f64`]. Indicator outputs use the same type, so a
/// result stream can feed another indicator directly.
pub type Price = f64;

/// Bar open timestamp.
pub type Timestamp = u64;

/// One OHLCV observation used as input to all indicators.
///
/// Implement this on your own kline/candle type to avoid per-tick
/// conversion. Indicators accept `&impl Ohlcv` and read only the value
/// selected by their configured [`PriceSource`](crate::PriceSource).
///
/// Bars are ordered by the bar index passed alongside them to
/// [`receive_tick`](crate::Indicator::receive_tick), not by
/// [`open_time`](Ohlcv::open_time).
///
/// # Example
///
/// ```
/// use streaming_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64, v: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
///     fn volume(&self) -> f64 { self.v }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp.
    fn open_time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    fn volume(&self) -> f64 {
        0.0
    }
}
