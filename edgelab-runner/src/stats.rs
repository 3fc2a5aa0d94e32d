//! Conditional return statistics — pure reductions over a filtered sample.
//!
//! Every statistic is a pure function: sample vector in, summary out. No
//! dependency on the analyzer, detectors, or data pipeline.

use serde::{Deserialize, Serialize};

/// Summary of forward returns conditioned on an event having fired.
///
/// `sample_count == 0` is the explicit no-data state: the probability is
/// 0.0 and the four order statistics are `None`. Callers branch on
/// `sample_count` before reading them; nothing here panics or divides by
/// zero on an empty sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalStats {
    /// Number of historical occurrences that entered the sample.
    pub sample_count: usize,
    /// Share of strictly positive samples, in percent (0.0 to 100.0).
    pub positive_probability: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl ConditionalStats {
    /// The no-data state.
    pub fn empty() -> Self {
        Self {
            sample_count: 0,
            positive_probability: 0.0,
            mean: None,
            median: None,
            max: None,
            min: None,
        }
    }

    /// Reduce a sample of forward returns to its conditional summary.
    ///
    /// The caller filters the sample; NaN values must not reach this point.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::empty();
        }

        let n = samples.len();
        let positives = samples.iter().filter(|&&x| x > 0.0).count();
        let sum: f64 = samples.iter().sum();
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);

        Self {
            sample_count: n,
            positive_probability: positives as f64 / n as f64 * 100.0,
            mean: Some(sum / n as f64),
            median: Some(median(samples)),
            max: Some(max),
            min: Some(min),
        }
    }
}

/// Median with the even-count convention of averaging the two middle values.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
