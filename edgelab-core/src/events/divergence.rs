//! MACD divergence — a 3-point local-extremum shape on the MACD line.
//!
//! Top divergence fires at bar t iff macd[t-1] > macd[t] and
//! macd[t-1] > macd[t-2]: the line printed a local peak one bar back.
//! Bottom divergence mirrors the inequalities (a local trough). Only the
//! immediately preceding bar is compared; wider extrema are outside this
//! shape test.
//!
//! Activation is latched: the signal reflects the most recent bar at which
//! a divergence fired, however far back, so `is_active` is true once any
//! divergence exists in the history. Bars before the MACD line is defined
//! (or before index 2) can neither fire nor leak a stale label.

use crate::domain::Bar;
use crate::indicators::IndicatorSet;

use super::EventDetector;

/// Which extremum shape to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceSide {
    Top,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct Divergence {
    side: DivergenceSide,
    key: String,
    name: String,
}

impl Divergence {
    pub fn top() -> Self {
        Self {
            side: DivergenceSide::Top,
            key: "macd".to_string(),
            name: "top_divergence".to_string(),
        }
    }

    pub fn bottom() -> Self {
        Self {
            side: DivergenceSide::Bottom,
            key: "macd".to_string(),
            name: "bottom_divergence".to_string(),
        }
    }
}

impl EventDetector for Divergence {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        2
    }

    fn detect(&self, bars: &[Bar], indicators: &IndicatorSet) -> Vec<bool> {
        let n = bars.len();
        let mut fired = vec![false; n];

        let Some(macd) = indicators.get_series(&self.key) else {
            return fired;
        };

        for t in 2..n.min(macd.len()) {
            let (two_back, one_back, cur) = (macd[t - 2], macd[t - 1], macd[t]);
            if two_back.is_nan() || one_back.is_nan() || cur.is_nan() {
                continue;
            }
            fired[t] = match self.side {
                DivergenceSide::Top => one_back > cur && one_back > two_back,
                DivergenceSide::Bottom => one_back < cur && one_back < two_back,
            };
        }

        fired
    }

    /// Latched: the most recent fired bar determines the current divergence
    /// state, so any firing in the history keeps the signal in force.
    fn is_active(&self, fired: &[bool]) -> bool {
        fired.iter().any(|&f| f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn macd_set(values: Vec<f64>) -> IndicatorSet {
        let mut set = IndicatorSet::new();
        set.insert("macd", values);
        set
    }

    #[test]
    fn top_fires_on_local_peak() {
        // Peak at index 2 -> top divergence fires at index 3.
        let bars = make_bars(&[100.0; 5]);
        let set = macd_set(vec![0.0, 1.0, 2.0, 1.5, 1.0]);
        let fired = Divergence::top().detect(&bars, &set);
        assert_eq!(fired, vec![false, false, false, true, false]);
    }

    #[test]
    fn bottom_fires_on_local_trough() {
        let bars = make_bars(&[100.0; 5]);
        let set = macd_set(vec![2.0, 1.0, 0.0, 0.5, 1.0]);
        let fired = Divergence::bottom().detect(&bars, &set);
        assert_eq!(fired, vec![false, false, false, true, false]);
    }

    #[test]
    fn monotone_line_never_fires() {
        let bars = make_bars(&[100.0; 6]);
        let rising = macd_set((0..6).map(|i| i as f64).collect());
        assert!(Divergence::top().detect(&bars, &rising).iter().all(|&f| !f));
        assert!(Divergence::bottom().detect(&bars, &rising).iter().all(|&f| !f));
    }

    #[test]
    fn flat_line_never_fires() {
        // Equal neighbours fail both strict comparisons.
        let bars = make_bars(&[100.0; 6]);
        let set = macd_set(vec![1.0; 6]);
        assert!(Divergence::top().detect(&bars, &set).iter().all(|&f| !f));
        assert!(Divergence::bottom().detect(&bars, &set).iter().all(|&f| !f));
    }

    #[test]
    fn nan_warmup_cannot_fire_or_latch() {
        let bars = make_bars(&[100.0; 5]);
        let set = macd_set(vec![f64::NAN, f64::NAN, 2.0, 1.0, 1.5]);
        let det = Divergence::top();
        let fired = det.detect(&bars, &set);
        // Indices 2 and 3 touch NaN history; index 4 sees 2.0 > 1.0 but
        // 1.0 > 1.5 fails the peak test -> nothing fires.
        assert!(fired.iter().all(|&f| !f));
        assert!(!det.is_active(&fired));
    }

    #[test]
    fn activation_is_latched() {
        let det = Divergence::top();
        assert!(det.is_active(&[false, true, false, false]));
        assert!(!det.is_active(&[false, false, false]));
    }
}
