//! Run configuration
//!
//! Parameters of one analysis run: the z-score threshold, where the figure
//! goes and how it is drawn, and how the table is saved. Loadable from TOML
//! or JSON; every field has a default so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::{ExportFormat, FigureConfig};

/// Configuration of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaConfig {
    /// Z-score threshold for outliers
    pub threshold: f64,
    /// Output path of the boxplot figure
    pub figure_path: String,
    /// Write 0-based row labels as the first column when saving
    pub include_row_labels: bool,
    /// Figure rendering parameters
    pub figure: FigureConfig,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            figure_path: "zscore_boxplots.svg".to_string(),
            include_row_labels: false,
            figure: FigureConfig::default(),
        }
    }
}

impl EdaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read and validate a TOML (or `.json`) configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json(&text).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            Self::from_toml(&text)?
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ConfigError::OutOfRange(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }

        if ExportFormat::from_path(Path::new(&self.figure_path)).is_none() {
            return Err(ConfigError::OutOfRange(format!(
                "figure_path must end in .svg or .png, got {}",
                self.figure_path
            )));
        }

        if self.figure.panel_width == 0 || self.figure.row_height == 0 {
            return Err(ConfigError::OutOfRange(
                "panel_width and row_height must be positive".to_string(),
            ));
        }

        for (name, value) in [
            ("outlier_opacity", self.figure.outlier_opacity),
            ("grid_opacity", self.figure.grid_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange(format!(
                    "{} must be between 0.0 and 1.0",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid configuration: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EdaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold, 3.0);
    }

    #[test]
    fn test_partial_toml() {
        let config = EdaConfig::from_toml("threshold = 2.5\n\n[figure]\npanel_width = 320\n").unwrap();
        assert_eq!(config.threshold, 2.5);
        assert_eq!(config.figure.panel_width, 320);
        assert_eq!(config.figure.row_height, 400);
        assert_eq!(config.figure_path, "zscore_boxplots.svg");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EdaConfig {
            include_row_labels: true,
            ..EdaConfig::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(EdaConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_threshold() {
        let config = EdaConfig {
            threshold: -1.0,
            ..EdaConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::OutOfRange(_))));
    }

    #[test]
    fn test_unsupported_figure_path() {
        let config = EdaConfig {
            figure_path: "boxplots.pdf".to_string(),
            ..EdaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eda.json");
        std::fs::write(&path, r#"{ "threshold": 2.0, "figure_path": "out.png" }"#).unwrap();
        let config = EdaConfig::load(&path).unwrap();
        assert_eq!(config.threshold, 2.0);
        assert_eq!(config.figure_path, "out.png");
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eda.toml");
        std::fs::write(&path, "[figure]\noutlier_opacity = 1.5\n").unwrap();
        assert!(EdaConfig::load(&path).is_err());
    }
}
