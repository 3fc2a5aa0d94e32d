//! Per-bar and forward cumulative returns.
//!
//! `bar_returns` is the percent change of close over the previous bar.
//! `forward_returns(h)` stores at bar t the cumulative percent return over
//! the h bars *following* t (t+1..=t+h): the value at t summarizes only the
//! future, so conditioning an event at t on it never leaks data from bars
//! <= t. The last h entries of any series are NaN and must stay excluded
//! from conditioning, never coerced to zero.

use crate::domain::Bar;

/// Percent change of close over the previous bar: (c_t / c_{t-1} - 1) * 100.
/// Undefined (NaN) at index 0.
pub fn bar_returns(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    for i in 1..n {
        let prev = bars[i - 1].close;
        let curr = bars[i].close;
        if prev.is_nan() || curr.is_nan() || prev == 0.0 {
            continue;
        }
        result[i] = (curr / prev - 1.0) * 100.0;
    }

    result
}

/// Cumulative return over the `horizon` bars following each bar.
///
/// Element t sums `returns[t+1..=t+horizon]`; equivalent to a length-h
/// rolling sum shifted back so the value lands on the triggering bar.
/// Exactly the last `horizon` elements are NaN, as is any element whose
/// window touches an undefined per-bar return.
pub fn forward_returns(returns: &[f64], horizon: usize) -> Vec<f64> {
    assert!(horizon >= 1, "forward horizon must be >= 1");

    let n = returns.len();
    let mut result = vec![f64::NAN; n];

    if n <= horizon {
        return result;
    }

    for t in 0..(n - horizon) {
        let window = &returns[t + 1..=t + horizon];
        if window.iter().any(|r| r.is_nan()) {
            continue;
        }
        result[t] = window.iter().sum();
    }

    result
}
