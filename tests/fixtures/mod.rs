#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use streaming_ta::{Indicator, IndicatorStream, Ohlcv, Price, Timestamp};
use tracing_subscriber::EnvFilter;

/// Hourly OHLCV bar parsed from the fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: u64,
    pub expected: f64,
}

const OHLCV_PATH: &str = "tests/fixtures/data/ohlcv-1h.csv";

/// Installs a test-friendly `tracing` subscriber honouring `RUST_LOG`.
/// Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Load the reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load single-value reference data (SMA, EMA).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Feeds every reference bar, starting at bar index 1.
pub fn feed_all<I: Indicator>(indicator: &mut I, bars: &[RefBar]) {
    for (i, bar) in bars.iter().enumerate() {
        indicator
            .receive_tick(bar, i + 1)
            .unwrap_or_else(|e| panic!("tick {} rejected: {e}", i + 1));
    }
}

/// Checks the full emitted stream against a reference file: one value per
/// reference row, aligned by `open_time`.
pub fn assert_stream_matches<I: Indicator>(
    indicator: &I,
    bars: &[RefBar],
    reference: &[RefValue],
    tolerance: f64,
) {
    assert_eq!(
        indicator.len(),
        reference.len(),
        "{indicator}: emitted {} values, reference has {}",
        indicator.len(),
        reference.len()
    );

    let first = indicator
        .valid_from_bar()
        .unwrap_or_else(|| panic!("{indicator} emitted nothing"));
    assert_eq!(
        bars[first - 1].open_time,
        reference[0].open_time,
        "{indicator}: first valid bar does not line up with the reference"
    );

    for (i, (&actual, expected)) in indicator.values().iter().zip(reference).enumerate() {
        assert_near(
            actual,
            expected.expected,
            tolerance,
            &format!("{indicator} at value {i} (t={})", expected.open_time),
        );
    }
}

/// Generate reference tests for a single-value indicator.
///
/// Usage: `reference_test!(sma_20, Sma, SmaConfig::close(20), "tests/fixtures/data/sma-20-close.csv", 1e-6);`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $ind:ty, $config:expr, $ref_path:expr, $tolerance:expr) => {
        mod $name {
            use super::fixtures::*;
            use streaming_ta::*;

            #[test]
            fn matches_reference() {
                init_tracing();
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let mut ind = <$ind>::new($config.expect("valid config"));

                feed_all(&mut ind, &bars);
                assert_stream_matches(&ind, &bars, &reference, $tolerance);
            }

            #[test]
            fn range_matches_reference_extremes() {
                let bars = load_reference_ohlcvs();
                let reference = load_ref_values($ref_path);
                let mut ind = <$ind>::new($config.expect("valid config"));
                feed_all(&mut ind, &bars);

                let min = reference.iter().map(|r| r.expected).fold(f64::INFINITY, f64::min);
                let max = reference
                    .iter()
                    .map(|r| r.expected)
                    .fold(f64::NEG_INFINITY, f64::max);
                assert_near(ind.min_value().unwrap(), min, $tolerance, "min");
                assert_near(ind.max_value().unwrap(), max, $tolerance, "max");
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
