//! Analysis pipeline — one consolidated indicator pass, event detection,
//! forward-return conditioning, and decision combination for a single
//! instrument.
//!
//! Data flows strictly one direction: price series -> indicators -> events
//! -> forward-return alignment -> per-event statistics -> weighted
//! aggregate -> verdict. No stage mutates another stage's output.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use edgelab_core::domain::{Bar, PriceSeries};
use edgelab_core::events::{
    CrossAbove, Divergence, EventDetector, EventKind, TrendBreak, TrendStart,
};
use edgelab_core::indicators::{compute_indicator_set, IndicatorSet};
use edgelab_core::returns::{bar_returns, forward_returns};

use crate::config::{AnalysisConfig, ConfigError};
use crate::decision::{combine, Decision};
use crate::expectancy::{conditional_stats, Signal};

/// Structured result of one pipeline run: every signal with its conditional
/// statistics, plus the combined decision. The engine never prints;
/// presentation belongs to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub bar_count: usize,
    pub config_id: String,
    pub signals: Vec<Signal>,
    pub decision: Decision,
}

/// Run the full pipeline for one instrument.
///
/// The indicator pass is computed once and shared by every detector; each
/// event family is conditioned on the forward-return series for its
/// configured horizon.
pub fn analyze(series: &PriceSeries, config: &AnalysisConfig) -> Result<AnalysisReport, ConfigError> {
    config.validate()?;

    let bars = series.bars();
    let (w_fast, w_slow) = config.trend_windows;
    let indicators = compute_indicator_set(bars, &[w_fast, w_slow]);

    let returns = bar_returns(bars);
    let fwd_event = forward_returns(&returns, config.horizon);
    let fwd_divergence = if config.divergence_horizon == config.horizon {
        fwd_event.clone()
    } else {
        forward_returns(&returns, config.divergence_horizon)
    };

    let event_detectors: Vec<(EventKind, Box<dyn EventDetector>)> = vec![
        (EventKind::MacdGoldenCross, Box::new(CrossAbove::macd())),
        (EventKind::KdjGoldenCross, Box::new(CrossAbove::kdj())),
        (
            EventKind::TrendBreak { window: w_fast },
            Box::new(TrendBreak::new(w_fast)),
        ),
        (
            EventKind::TrendBreak { window: w_slow },
            Box::new(TrendBreak::new(w_slow)),
        ),
        (
            EventKind::TrendStart { window: w_fast },
            Box::new(TrendStart::new(w_fast)),
        ),
    ];
    let divergence_detectors: Vec<(EventKind, Box<dyn EventDetector>)> = vec![
        (EventKind::TopDivergence, Box::new(Divergence::top())),
        (EventKind::BottomDivergence, Box::new(Divergence::bottom())),
    ];

    let mut signals = Vec::with_capacity(event_detectors.len() + divergence_detectors.len());
    for (kind, detector) in &event_detectors {
        signals.push(evaluate(*kind, detector.as_ref(), bars, &indicators, &fwd_event));
    }
    for (kind, detector) in &divergence_detectors {
        signals.push(evaluate(*kind, detector.as_ref(), bars, &indicators, &fwd_divergence));
    }

    let decision = combine(&signals);

    Ok(AnalysisReport {
        symbol: series.symbol().to_string(),
        bar_count: bars.len(),
        config_id: config.run_id(),
        signals,
        decision,
    })
}

fn evaluate(
    kind: EventKind,
    detector: &dyn EventDetector,
    bars: &[Bar],
    indicators: &IndicatorSet,
    forward: &[f64],
) -> Signal {
    let fired = detector.detect(bars, indicators);
    debug_assert_eq!(fired.len(), bars.len());
    Signal {
        kind,
        active: detector.is_active(&fired),
        stats: conditional_stats(&fired, forward),
    }
}

/// Analyze a batch of instruments, one independent pipeline run each.
///
/// Instruments share nothing, so the fan-out is a plain parallel map.
pub fn analyze_many(
    series: &[PriceSeries],
    config: &AnalysisConfig,
) -> Vec<Result<AnalysisReport, ConfigError>> {
    series.par_iter().map(|s| analyze(s, config)).collect()
}
