//! MACD — Moving Average Convergence Divergence.
//!
//! line = EMA(fast) - EMA(slow) of close; signal = EMA(signal span) of the
//! line; histogram = line - signal. The EMAs seed from the first value, so
//! all three outputs are defined from bar 0.
//!
//! Produces three series, exposed as separate `Indicator` instances per
//! output line; `MacdSeries::compute` derives all three in one pass for the
//! consolidated indicator set.

use crate::domain::Bar;

use super::ema::ema_of_series;
use super::Indicator;

/// Standard MACD spans.
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// Which MACD output line to expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    Signal,
    Histogram,
}

/// All three MACD outputs, derived in a single pass.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn compute(bars: &[Bar], fast: usize, slow: usize, signal_span: usize) -> Self {
        assert!(fast >= 1, "MACD fast span must be >= 1");
        assert!(slow > fast, "MACD slow span must be > fast span");
        assert!(signal_span >= 1, "MACD signal span must be >= 1");

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast_ema = ema_of_series(&closes, fast);
        let slow_ema = ema_of_series(&closes, slow);

        let line: Vec<f64> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(f, s)| f - s)
            .collect();
        let signal = ema_of_series(&line, signal_span);
        let histogram: Vec<f64> = line.iter().zip(&signal).map(|(l, s)| l - s).collect();

        Self {
            line,
            signal,
            histogram,
        }
    }

    fn take(self, output: MacdOutput) -> Vec<f64> {
        match output {
            MacdOutput::Line => self.line,
            MacdOutput::Signal => self.signal,
            MacdOutput::Histogram => self.histogram,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal_span: usize,
    output: MacdOutput,
    name: String,
}

impl Macd {
    /// The MACD line with standard 12/26/9 spans.
    pub fn line() -> Self {
        Self::with_spans(MACD_FAST, MACD_SLOW, MACD_SIGNAL, MacdOutput::Line)
    }

    /// The signal line with standard 12/26/9 spans.
    pub fn signal_line() -> Self {
        Self::with_spans(MACD_FAST, MACD_SLOW, MACD_SIGNAL, MacdOutput::Signal)
    }

    /// The histogram with standard 12/26/9 spans.
    pub fn histogram() -> Self {
        Self::with_spans(MACD_FAST, MACD_SLOW, MACD_SIGNAL, MacdOutput::Histogram)
    }

    pub fn with_spans(fast: usize, slow: usize, signal_span: usize, output: MacdOutput) -> Self {
        assert!(fast >= 1, "MACD fast span must be >= 1");
        assert!(slow > fast, "MACD slow span must be > fast span");
        assert!(signal_span >= 1, "MACD signal span must be >= 1");
        let name = match output {
            MacdOutput::Line => "macd".to_string(),
            MacdOutput::Signal => "macd_signal".to_string(),
            MacdOutput::Histogram => "macd_hist".to_string(),
        };
        Self {
            fast,
            slow,
            signal_span,
            output,
            name,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        MacdSeries::compute(bars, self.fast, self.slow, self.signal_span).take(self.output)
    }
}
