//! EdgeLab Core — the event-conditioned expectancy engine.
//!
//! This crate contains the computational heart of the pipeline:
//! - Domain types (bars, validated price series)
//! - One consolidated indicator pass (SMA, EMA, MACD, stochastic K/D/J)
//! - Event detectors (golden crosses, trend break/start, MACD divergences)
//! - Per-bar and forward cumulative returns with strict no-look-ahead
//!   alignment
//!
//! Everything here is pure: series in, series out, no I/O, no printing.
//! Undefined values (warm-up bars, forward windows past the series end) are
//! explicit `f64::NAN` entries, never silently dropped rows.

pub mod domain;
pub mod events;
pub mod indicators;
pub mod returns;
