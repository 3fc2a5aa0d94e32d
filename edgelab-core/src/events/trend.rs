//! Price-versus-moving-average trend events.
//!
//! TrendBreak fires on every bar where the close sits below its w-bar mean;
//! the break is *in force* only after `BREAK_RUN_LENGTH` consecutive fired
//! bars. TrendStart fires where the close sits above the mean and is in
//! force whenever the latest bar fired. Bars inside the moving-average
//! warm-up fire neither event.

use crate::domain::Bar;
use crate::indicators::IndicatorSet;

use super::EventDetector;

/// Consecutive below-mean bars required before a break is in force,
/// independent of the moving-average window.
pub const BREAK_RUN_LENGTH: usize = 5;

/// Close below its w-bar moving average.
#[derive(Debug, Clone)]
pub struct TrendBreak {
    window: usize,
    key: String,
    name: String,
}

impl TrendBreak {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "trend window must be >= 1");
        Self {
            window,
            key: format!("sma_{window}"),
            name: format!("trend_break_{window}"),
        }
    }
}

impl EventDetector for TrendBreak {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        self.window - 1
    }

    fn detect(&self, bars: &[Bar], indicators: &IndicatorSet) -> Vec<bool> {
        below_mean(bars, indicators, &self.key, Side::Below)
    }

    /// A break is in force only after five consecutive below-mean closes.
    fn is_active(&self, fired: &[bool]) -> bool {
        fired.len() >= BREAK_RUN_LENGTH
            && fired[fired.len() - BREAK_RUN_LENGTH..].iter().all(|&f| f)
    }
}

/// Close above its w-bar moving average.
#[derive(Debug, Clone)]
pub struct TrendStart {
    window: usize,
    key: String,
    name: String,
}

impl TrendStart {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "trend window must be >= 1");
        Self {
            window,
            key: format!("sma_{window}"),
            name: format!("trend_start_{window}"),
        }
    }
}

impl EventDetector for TrendStart {
    fn name(&self) -> &str {
        &self.name
    }

    fn warmup_bars(&self) -> usize {
        self.window - 1
    }

    fn detect(&self, bars: &[Bar], indicators: &IndicatorSet) -> Vec<bool> {
        below_mean(bars, indicators, &self.key, Side::Above)
    }
}

#[derive(Clone, Copy)]
enum Side {
    Below,
    Above,
}

fn below_mean(bars: &[Bar], indicators: &IndicatorSet, key: &str, side: Side) -> Vec<bool> {
    let n = bars.len();
    let mut fired = vec![false; n];

    let Some(mean) = indicators.get_series(key) else {
        return fired;
    };

    for t in 0..n.min(mean.len()) {
        let (close, avg) = (bars[t].close, mean[t]);
        if close.is_nan() || avg.is_nan() {
            continue;
        }
        fired[t] = match side {
            Side::Below => close < avg,
            Side::Above => close > avg,
        };
    }

    fired
}
