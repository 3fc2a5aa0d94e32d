//! EdgeLab Runner — analysis orchestration on top of the core engine.
//!
//! This crate turns a validated `PriceSeries` into an `AnalysisReport`:
//! - Conditional statistics over event-masked forward returns
//! - Probability-weighted expectancy and the buy/no-buy decision
//! - Serializable analysis configuration with content-addressed run ids
//! - CSV ingestion and deterministic synthetic data
//! - Parallel fan-out across instruments (one pipeline run each)
//!
//! Presentation is a caller concern: nothing in this crate prints.

pub mod analyzer;
pub mod config;
pub mod data_loader;
pub mod decision;
pub mod expectancy;
pub mod stats;
pub mod synthetic;

pub use analyzer::{analyze, analyze_many, AnalysisReport};
pub use config::{AnalysisConfig, ConfigError};
pub use data_loader::{load_csv, DataError};
pub use decision::{combine, Decision, Verdict};
pub use expectancy::{conditional_stats, Signal};
pub use stats::ConditionalStats;
