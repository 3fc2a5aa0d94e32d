//! Event-conditioned expectancy — the one conditioning routine every event
//! family feeds.
//!
//! An event's conditional sample is the set of forward-return values at
//! bars where the event fired and the forward window is defined. Undefined
//! (NaN) forward values never enter the sample — a bar too close to the
//! series end is excluded, not counted as a zero return.

use edgelab_core::events::EventKind;
use serde::{Deserialize, Serialize};

use crate::stats::ConditionalStats;

/// One event family: whether it is in force at the latest bar, and the
/// statistics of forward returns over its historical firings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: EventKind,
    pub active: bool,
    pub stats: ConditionalStats,
}

/// Restrict forward returns to bars where the event fired, drop undefined
/// values, and reduce to conditional statistics.
pub fn conditional_stats(fired: &[bool], forward: &[f64]) -> ConditionalStats {
    debug_assert_eq!(fired.len(), forward.len(), "series must stay aligned");

    let samples: Vec<f64> = fired
        .iter()
        .zip(forward)
        .filter(|(fired, value)| **fired && !value.is_nan())
        .map(|(_, value)| *value)
        .collect();

    ConditionalStats::from_samples(&samples)
}
