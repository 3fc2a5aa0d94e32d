//! Stochastic oscillator (K/D) and the derived J line.
//!
//! raw %K = 100 * (close - LL) / (HH - LL) over a fastk look-back window of
//! high/low/close; %K = SMA(slowk) of raw %K; %D = SMA(slowd) of %K;
//! J = 3K - 2D (may leave the [0,100] band).
//!
//! A flat look-back window (HH == LL) has no defined momentum reading and
//! yields NaN, excluded downstream like any warm-up bar.
//! Lookback: K = fastk + slowk - 2; D and J add slowd - 1 on top.

use crate::domain::Bar;

use super::sma::sma_of_series;
use super::Indicator;

/// Standard stochastic periods.
pub const STOCH_FASTK: usize = 9;
pub const STOCH_SLOWK: usize = 3;
pub const STOCH_SLOWD: usize = 3;

/// Which stochastic output line to expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochOutput {
    K,
    D,
    J,
}

/// All three stochastic outputs, derived in a single pass.
#[derive(Debug, Clone)]
pub struct StochSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub j: Vec<f64>,
}

impl StochSeries {
    pub fn compute(bars: &[Bar], fastk: usize, slowk: usize, slowd: usize) -> Self {
        assert!(fastk >= 1, "stochastic fastk period must be >= 1");
        assert!(slowk >= 1, "stochastic slowk period must be >= 1");
        assert!(slowd >= 1, "stochastic slowd period must be >= 1");

        let n = bars.len();
        let mut raw = vec![f64::NAN; n];

        if n >= fastk {
            for i in (fastk - 1)..n {
                let window = &bars[i + 1 - fastk..=i];
                let mut highest = f64::NEG_INFINITY;
                let mut lowest = f64::INFINITY;
                let mut has_nan = false;
                for bar in window {
                    if bar.high.is_nan() || bar.low.is_nan() {
                        has_nan = true;
                        break;
                    }
                    highest = highest.max(bar.high);
                    lowest = lowest.min(bar.low);
                }
                if has_nan || bars[i].close.is_nan() {
                    continue;
                }
                let range = highest - lowest;
                if range == 0.0 {
                    continue; // flat window, no defined reading
                }
                raw[i] = (bars[i].close - lowest) / range * 100.0;
            }
        }

        let k = sma_of_series(&raw, slowk);
        let d = sma_of_series(&k, slowd);
        let j: Vec<f64> = k.iter().zip(&d).map(|(k, d)| 3.0 * k - 2.0 * d).collect();

        Self { k, d, j }
    }

    fn take(self, output: StochOutput) -> Vec<f64> {
        match output {
            StochOutput::K => self.k,
            StochOutput::D => self.d,
            StochOutput::J => self.j,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Stoch {
    fastk: usize,
    slowk: usize,
    slowd: usize,
    output: StochOutput,
    name: String,
}

impl Stoch {
    /// %K with standard 9/3/3 periods.
    pub fn k() -> Self {
        Self::with_periods(STOCH_FASTK, STOCH_SLOWK, STOCH_SLOWD, StochOutput::K)
    }

    /// %D with standard 9/3/3 periods.
    pub fn d() -> Self {
        Self::with_periods(STOCH_FASTK, STOCH_SLOWK, STOCH_SLOWD, StochOutput::D)
    }

    /// J with standard 9/3/3 periods.
    pub fn j() -> Self {
        Self::with_periods(STOCH_FASTK, STOCH_SLOWK, STOCH_SLOWD, StochOutput::J)
    }

    pub fn with_periods(fastk: usize, slowk: usize, slowd: usize, output: StochOutput) -> Self {
        assert!(fastk >= 1, "stochastic fastk period must be >= 1");
        assert!(slowk >= 1, "stochastic slowk period must be >= 1");
        assert!(slowd >= 1, "stochastic slowd period must be >= 1");
        let name = match output {
            StochOutput::K => "kdj_k".to_string(),
            StochOutput::D => "kdj_d".to_string(),
            StochOutput::J => "kdj_j".to_string(),
        };
        Self {
            fastk,
            slowk,
            slowd,
            output,
            name,
        }
    }
}

impl Indicator for Stoch {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        let k_lookback = self.fastk - 1 + self.slowk - 1;
        match self.output {
            StochOutput::K => k_lookback,
            StochOutput::D | StochOutput::J => k_lookback + self.slowd - 1,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        StochSeries::compute(bars, self.fastk, self.slowk, self.slowd).take(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    #[test]
    fn raw_k_known_values() {
        // make_bars on [10,20,30,40]:
        //   highs 11, 21, 31, 41; lows 9, 9, 19, 29
        // fastk=3, slowk=1 (K = raw), slowd=2.
        // K[2]: HH=31, LL=9  -> 100*(30-9)/22
        // K[3]: HH=41, LL=9  -> 100*(40-9)/32
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0]);
        let series = StochSeries::compute(&bars, 3, 1, 2);

        assert!(series.k[0].is_nan());
        assert!(series.k[1].is_nan());
        assert_approx(series.k[2], 100.0 * 21.0 / 22.0, DEFAULT_EPSILON);
        assert_approx(series.k[3], 100.0 * 31.0 / 32.0, DEFAULT_EPSILON);

        // D[3] = mean(K[2], K[3]); earlier windows touch NaN.
        assert!(series.d[2].is_nan());
        assert_approx(
            series.d[3],
            (100.0 * 21.0 / 22.0 + 100.0 * 31.0 / 32.0) / 2.0,
            DEFAULT_EPSILON,
        );

        // J = 3K - 2D where both are defined.
        assert!(series.j[2].is_nan());
        assert_approx(
            series.j[3],
            3.0 * series.k[3] - 2.0 * series.d[3],
            DEFAULT_EPSILON,
        );
    }

    #[test]
    fn flat_window_yields_nan() {
        // Bars with high == low == close: no range, no reading.
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars: Vec<Bar> = (0..6)
            .map(|i| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: 50.0,
                high: 50.0,
                low: 50.0,
                close: 50.0,
            })
            .collect();
        let series = StochSeries::compute(&bars, 3, 1, 1);
        assert!(series.k.iter().all(|v| v.is_nan()));
        assert!(series.d.iter().all(|v| v.is_nan()));
        assert!(series.j.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn j_can_leave_percent_band() {
        // A flat stretch followed by a steep ramp pushes K toward 100
        // faster than D follows, so J = 3K - 2D overshoots 100.
        let mut closes = vec![100.0; 12];
        closes.extend((1..=6).map(|i| 100.0 + 30.0 * i as f64));
        let bars = make_bars(&closes);
        let series = StochSeries::compute(&bars, 9, 3, 3);
        let overshoot = series
            .j
            .iter()
            .filter(|v| !v.is_nan())
            .any(|&v| v > 100.0);
        assert!(overshoot, "expected J to exceed 100 on a strong ramp");
    }

    #[test]
    fn lookbacks() {
        assert_eq!(Stoch::k().lookback(), 10);
        assert_eq!(Stoch::d().lookback(), 12);
        assert_eq!(Stoch::j().lookback(), 12);
    }

    #[test]
    fn first_defined_index_matches_lookback() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + (i as f64 * 1.3).sin() * 9.0).collect();
        let bars = make_bars(&closes);

        for stoch in [Stoch::k(), Stoch::d(), Stoch::j()] {
            let values = stoch.compute(&bars);
            let lookback = stoch.lookback();
            for (i, v) in values.iter().enumerate() {
                if i < lookback {
                    assert!(v.is_nan(), "{} index {i} inside warm-up", stoch.name());
                } else {
                    assert!(!v.is_nan(), "{} index {i} past warm-up", stoch.name());
                }
            }
        }
    }

    #[test]
    fn names() {
        assert_eq!(Stoch::k().name(), "kdj_k");
        assert_eq!(Stoch::d().name(), "kdj_d");
        assert_eq!(Stoch::j().name(), "kdj_j");
    }
}
