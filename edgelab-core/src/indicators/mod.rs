//! Indicator pass — pure series-in, series-out computations.
//!
//! Every indicator implements the `Indicator` trait and is computed once
//! per analysis into an `IndicatorSet` shared by all event detectors; no
//! detector recomputes an indicator. Multi-output indicators (MACD,
//! stochastic) are exposed as separate named instances per output line,
//! keeping the single-series trait unchanged, while `compute_indicator_set`
//! derives all outputs of a family in one pass.

pub mod ema;
pub mod macd;
pub mod sma;
pub mod stoch;

pub use ema::{ema_of_series, Ema};
pub use macd::{Macd, MacdOutput, MacdSeries};
pub use sma::{sma_of_series, Sma};
pub use stoch::{Stoch, StochOutput, StochSeries};

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length, with `f64::NAN` marking warm-up bars where the window
/// is incomplete.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or
/// later. Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name, also the `IndicatorSet` key (e.g., "sma_10").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    /// The first `lookback()` values should be `f64::NAN`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Container for precomputed indicator series.
///
/// Built once per analysis, then read by every event detector.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Compute the consolidated indicator pass shared by every detector:
/// all three MACD outputs, stochastic K/D/J, and one simple moving average
/// per requested trend window. Each indicator family is derived once.
pub fn compute_indicator_set(bars: &[Bar], trend_windows: &[usize]) -> IndicatorSet {
    let mut set = IndicatorSet::new();

    let macd = MacdSeries::compute(bars, macd::MACD_FAST, macd::MACD_SLOW, macd::MACD_SIGNAL);
    set.insert("macd", macd.line);
    set.insert("macd_signal", macd.signal);
    set.insert("macd_hist", macd.histogram);

    let stoch = StochSeries::compute(
        bars,
        stoch::STOCH_FASTK,
        stoch::STOCH_SLOWK,
        stoch::STOCH_SLOWD,
    );
    set.insert("kdj_k", stoch.k);
    set.insert("kdj_d", stoch.d);
    set.insert("kdj_j", stoch.j);

    for &window in trend_windows {
        let sma = Sma::new(window);
        let values = sma.compute(bars);
        set.insert(sma.name().to_string(), values);
    }

    set
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHL: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
