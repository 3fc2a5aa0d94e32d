//! Analysis configuration — serializable parameters for one pipeline run.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be at least 1")]
    ZeroParameter { field: &'static str },
}

/// Parameters recognized by the analysis pipeline.
///
/// `horizon` is the forward-return window for the momentum and trend
/// events; the divergence events condition on their own, typically shorter,
/// window. `trend_windows` are the moving-average lengths the trend
/// detectors compare the close against; trend-start uses the first of the
/// pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Forward-return window for momentum and trend events, in bars.
    pub horizon: usize,
    /// Moving-average windows for the trend detectors.
    pub trend_windows: (usize, usize),
    /// Forward-return window for the divergence events, in bars.
    pub divergence_horizon: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            horizon: 10,
            trend_windows: (5, 10),
            divergence_horizon: 5,
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon == 0 {
            return Err(ConfigError::ZeroParameter { field: "horizon" });
        }
        if self.divergence_horizon == 0 {
            return Err(ConfigError::ZeroParameter {
                field: "divergence_horizon",
            });
        }
        if self.trend_windows.0 == 0 || self.trend_windows.1 == 0 {
            return Err(ConfigError::ZeroParameter {
                field: "trend_windows",
            });
        }
        Ok(())
    }

    /// Content-addressed identifier for this configuration.
    ///
    /// Two runs with identical parameters produce the same id, so reports
    /// from the same configuration can be grouped or deduplicated.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("AnalysisConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.horizon, 10);
        assert_eq!(config.trend_windows, (5, 10));
        assert_eq!(config.divergence_horizon, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml_over_defaults() {
        let config = AnalysisConfig::from_toml("horizon = 5\n").unwrap();
        assert_eq!(config.horizon, 5);
        assert_eq!(config.trend_windows, (5, 10));
    }

    #[test]
    fn parses_full_toml() {
        let text = r#"
horizon = 7
trend_windows = [3, 20]
divergence_horizon = 4
"#;
        let config = AnalysisConfig::from_toml(text).unwrap();
        assert_eq!(config.horizon, 7);
        assert_eq!(config.trend_windows, (3, 20));
        assert_eq!(config.divergence_horizon, 4);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(AnalysisConfig::from_toml("lookahead = true\n").is_err());
    }

    #[test]
    fn rejects_zero_horizon() {
        let err = AnalysisConfig::from_toml("horizon = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroParameter { field: "horizon" }));
    }

    #[test]
    fn rejects_zero_trend_window() {
        let err = AnalysisConfig::from_toml("trend_windows = [0, 10]\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroParameter {
                field: "trend_windows"
            }
        ));
    }

    #[test]
    fn run_id_is_stable_and_parameter_sensitive() {
        let a = AnalysisConfig::default();
        let b = AnalysisConfig::default();
        assert_eq!(a.run_id(), b.run_id());

        let c = AnalysisConfig {
            horizon: 5,
            ..AnalysisConfig::default()
        };
        assert_ne!(a.run_id(), c.run_id());
    }
}
