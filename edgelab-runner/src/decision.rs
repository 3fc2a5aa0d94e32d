//! Decision combination — probability-weighted sum of the active signals.

use serde::{Deserialize, Serialize};

use crate::expectancy::Signal;

/// Buy/no-buy verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Buy,
    NoBuy,
}

/// Aggregate expectancy over the currently active signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub expectation: f64,
    pub verdict: Verdict,
}

/// Combine the active signals into one expectancy and threshold it.
///
/// Each active signal contributes positive_probability x mean / 100 — an
/// expected-value proxy per signal, summed across signals. The combination
/// is a heuristic: signals are neither mutually exclusive nor independent,
/// and no joint probability model is implied. Signals with an empty sample
/// have no defined mean and contribute nothing, so an empty active set
/// sums to 0.0, which still meets the >= 0 buy threshold.
pub fn combine(signals: &[Signal]) -> Decision {
    let expectation: f64 = signals
        .iter()
        .filter(|s| s.active)
        .filter_map(|s| {
            s.stats
                .mean
                .map(|mean| s.stats.positive_probability * mean / 100.0)
        })
        .sum();

    let verdict = if expectation >= 0.0 {
        Verdict::Buy
    } else {
        Verdict::NoBuy
    };

    Decision {
        expectation,
        verdict,
    }
}
