//! Event detection — named boolean series aligned to the bar history.
//!
//! Detectors are market-state pure: they receive bar history and the
//! precomputed indicator pass, never statistics or portfolio state. A
//! detector reports two things: on which bars its event fired historically
//! (the conditioning series), and whether the signal is in force at the
//! latest bar. For most events those coincide; trend breaks and divergences
//! derive their activation from the fired history instead.

pub mod divergence;
pub mod golden_cross;
pub mod trend;

pub use divergence::{Divergence, DivergenceSide};
pub use golden_cross::CrossAbove;
pub use trend::{TrendBreak, TrendStart, BREAK_RUN_LENGTH};

use crate::domain::Bar;
use crate::indicators::IndicatorSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the signal event families produced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    MacdGoldenCross,
    KdjGoldenCross,
    TrendBreak { window: usize },
    TrendStart { window: usize },
    TopDivergence,
    BottomDivergence,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::MacdGoldenCross => write!(f, "macd_golden_cross"),
            EventKind::KdjGoldenCross => write!(f, "kdj_golden_cross"),
            EventKind::TrendBreak { window } => write!(f, "trend_break_{window}"),
            EventKind::TrendStart { window } => write!(f, "trend_start_{window}"),
            EventKind::TopDivergence => write!(f, "top_divergence"),
            EventKind::BottomDivergence => write!(f, "bottom_divergence"),
        }
    }
}

/// Trait for event detectors.
///
/// # Look-ahead contamination guard
/// `detect` must only use data from bars `0..=t` when deciding element t.
/// Warm-up bars and bars with undefined indicator values are `false`,
/// never an error.
pub trait EventDetector: Send + Sync {
    /// Human-readable name (e.g., "macd_golden_cross").
    fn name(&self) -> &str;

    /// Number of bars needed before the event can first fire.
    fn warmup_bars(&self) -> usize;

    /// Whole-series detection: element t is true iff the event fired at
    /// bar t. The result has exactly `bars.len()` elements.
    fn detect(&self, bars: &[Bar], indicators: &IndicatorSet) -> Vec<bool>;

    /// Whether the signal is in force at the latest bar.
    ///
    /// Defaults to the last fired value; detectors whose activation is
    /// derived from the fired history override this.
    fn is_active(&self, fired: &[bool]) -> bool {
        fired.last().copied().unwrap_or(false)
    }
}
