//! Upward crossing detector — a fast line crossing from below to above a
//! reference line.
//!
//! Fires at bar t iff fast[t] > slow[t] and fast[t-1] < slow[t-1]. The
//! previous-bar comparison is strict `<`: a bar that touches the reference
//! exactly counts on neither side. The `>` now / `<` before asymmetry is
//! intentional and must not be "corrected" to a symmetric >= rule — it is
//! the crossing semantics the conditional statistics are calibrated on.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorSet, Stoch};

use super::EventDetector;

/// Generic upward-crossing event over two named indicator series.
#[derive(Debug, Clone)]
pub struct CrossAbove {
    fast_key: String,
    slow_key: String,
    name: String,
    warmup: usize,
}

impl CrossAbove {
    pub fn new(
        name: impl Into<String>,
        fast_key: impl Into<String>,
        slow_key: impl Into<String>,
        warmup: usize,
    ) -> Self {
        Self {
            fast_key: fast_key.into(),
            slow_key: slow_key.into(),
            name: name.into(),
            warmup: warmup.max(1),
        }
    }

    /// MACD line crossing above its signal line. Both lines are defined
    /// from bar 0, so only the previous-bar requirement remains.
    pub fn macd() -> Self {
        Self::new("macd_golden_cross", "macd", "macd_signal", 1)
    }

    /// %K crossing above %D.
    pub fn kdj() -> Self {
        Self::new("kdj_golden_cross", "kdj_k", "kdj_d", Stoch::d().lookback() + 1)
    }
}

impl EventDetector for CrossAbove {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        self.warmup
    }

    fn detect(&self, bars: &[Bar], indicators: &IndicatorSet) -> Vec<bool> {
        let n = bars.len();
        let mut fired = vec![false; n];

        let (Some(fast), Some(slow)) = (
            indicators.get_series(&self.fast_key),
            indicators.get_series(&self.slow_key),
        ) else {
            return fired;
        };

        let end = n.min(fast.len()).min(slow.len());
        for t in self.warmup..end {
            let (fast_cur, slow_cur) = (fast[t], slow[t]);
            let (fast_prev, slow_prev) = (fast[t - 1], slow[t - 1]);
            if fast_cur.is_nan() || slow_cur.is_nan() || fast_prev.is_nan() || slow_prev.is_nan() {
                continue;
            }
            fired[t] = fast_cur > slow_cur && fast_prev < slow_prev;
        }

        fired
    }
}
