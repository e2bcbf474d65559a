//! Property tests for the stream contract shared by every indicator.

use proptest::prelude::*;
use streaming_ta::{
    Chain, Ema, EmaConfig, Error, Indicator, IndicatorConfig, IndicatorConfigBuilder,
    IndicatorStream, Ohlcv, Price, PriceSource, Sma, SmaConfig, Timestamp,
};

struct Close(f64);

impl Ohlcv for Close {
    fn open(&self) -> Price {
        self.0
    }
    fn high(&self) -> Price {
        self.0
    }
    fn low(&self) -> Price {
        self.0
    }
    fn close(&self) -> Price {
        self.0
    }
    fn open_time(&self) -> Timestamp {
        0
    }
}

fn arb_closes(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

fn brute_force_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Feeds `closes` one by one and checks the contract after every tick.
fn check_contract<I: Indicator>(mut indicator: I, closes: &[f64]) -> Result<(), TestCaseError> {
    let lookback = indicator.lookback();

    for (i, &close) in closes.iter().enumerate() {
        let ticks = i + 1;
        indicator
            .receive_tick(&Close(close), ticks)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(indicator.len(), ticks.saturating_sub(lookback - 1));

        if ticks < lookback {
            prop_assert!(indicator.is_empty());
            prop_assert_eq!(indicator.valid_from_bar(), None);
            prop_assert_eq!(indicator.min_value(), Err(Error::EmptyStream));
            prop_assert_eq!(indicator.max_value(), Err(Error::EmptyStream));
        } else {
            prop_assert_eq!(indicator.valid_from_bar(), Some(lookback));

            let (min, max) = brute_force_range(indicator.values());
            prop_assert_eq!(indicator.min_value(), Ok(min));
            prop_assert_eq!(indicator.max_value(), Ok(max));

            if ticks == lookback {
                prop_assert_eq!(indicator.min_value(), indicator.max_value());
            }
        }
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn ema_honours_stream_contract(closes in arb_closes(1, 80), period in 1usize..=12) {
        check_contract(Ema::new(EmaConfig::close(period).unwrap()), &closes)?;
    }

    #[test]
    fn sma_honours_stream_contract(closes in arb_closes(1, 80), period in 1usize..=12) {
        check_contract(Sma::new(SmaConfig::close(period).unwrap()), &closes)?;
    }

    #[test]
    fn chain_honours_stream_contract(
        closes in arb_closes(1, 80),
        outer in 1usize..=6,
        inner in 1usize..=6,
    ) {
        let upstream = Ema::new(EmaConfig::close(outer).unwrap());
        let downstream = Sma::new(
            SmaConfig::builder()
                .length(inner)
                .source(PriceSource::Close)
                .first_bar(upstream.first_valid_bar())
                .build()
                .unwrap(),
        );
        check_contract(Chain::new(upstream, downstream).unwrap(), &closes)?;
    }

    /// The EMA output always stays within the range of its inputs.
    #[test]
    fn ema_is_bounded_by_inputs(closes in arb_closes(1, 80), period in 1usize..=12) {
        let mut ema = Ema::new(EmaConfig::close(period).unwrap());
        for (i, &close) in closes.iter().enumerate() {
            ema.receive_tick(&Close(close), i + 1).unwrap();
        }

        let (lo, hi) = brute_force_range(&closes);
        let eps = hi * 1e-12;
        for &v in ema.values() {
            prop_assert!(v >= lo - eps && v <= hi + eps, "{v} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn queries_are_idempotent(closes in arb_closes(1, 40), period in 1usize..=8) {
        let mut ema = Ema::new(EmaConfig::close(period).unwrap());
        for (i, &close) in closes.iter().enumerate() {
            ema.receive_tick(&Close(close), i + 1).unwrap();
        }

        let first = (ema.len(), ema.valid_from_bar(), ema.min_value(), ema.max_value());
        let second = (ema.len(), ema.valid_from_bar(), ema.min_value(), ema.max_value());
        prop_assert_eq!(first, second);
    }

    /// A rejected tick never changes what has been emitted.
    #[test]
    fn out_of_sequence_leaves_state_untouched(
        closes in arb_closes(1, 40),
        period in 1usize..=8,
        skip in 2usize..=5,
    ) {
        let mut ema = Ema::new(EmaConfig::close(period).unwrap());
        for (i, &close) in closes.iter().enumerate() {
            ema.receive_tick(&Close(close), i + 1).unwrap();
        }

        let before = ema.values().to_vec();
        let bad_index = closes.len() + skip;
        prop_assert_eq!(
            ema.receive_tick(&Close(1.0), bad_index),
            Err(Error::OutOfSequence { expected: closes.len() + 1, got: bad_index })
        );
        prop_assert_eq!(ema.values(), before.as_slice());
    }

    /// Heterogeneous indicators are inspected uniformly through the view.
    #[test]
    fn dyn_view_matches_concrete(closes in arb_closes(1, 40), period in 1usize..=8) {
        let mut ema = Ema::new(EmaConfig::close(period).unwrap());
        let mut sma = Sma::new(SmaConfig::close(period).unwrap());
        for (i, &close) in closes.iter().enumerate() {
            ema.receive_tick(&Close(close), i + 1).unwrap();
            sma.receive_tick(&Close(close), i + 1).unwrap();
        }

        let views: [&dyn IndicatorStream; 2] = [&ema, &sma];
        for view in views {
            prop_assert_eq!(view.len(), ema.len());
            prop_assert_eq!(view.valid_from_bar(), sma.valid_from_bar());
        }
    }
}
