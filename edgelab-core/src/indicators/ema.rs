//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1]
//! alpha = 2 / (span + 1). Seed: the first close, so every bar from index 0
//! carries a defined value and the lookback is 0.

use crate::domain::Bar;

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ema_of_series(&closes, self.span)
    }
}

/// Compute raw EMA values from a pre-extracted f64 slice.
///
/// Seeded from the first value. A NaN input taints every subsequent value:
/// the recurrence has no way to recover a defined state once poisoned.
/// Used internally by composed indicators (MACD line and signal) that need
/// an EMA of an arbitrary series.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 || span == 0 {
        return result;
    }

    if values[0].is_nan() {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    result[0] = values[0];
    let mut prev = values[0];

    for i in 1..n {
        if values[i].is_nan() {
            for val in result.iter_mut().skip(i) {
                *val = f64::NAN;
            }
            return result;
        }
        let ema = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = ema;
        prev = ema;
    }

    result
}
