//! Application Configuration
//! Settings loaded from a JSON file, falling back to defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DATA_VISUALIZER_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "data_visualizer.json";

pub const MIN_BINS: usize = 1;
pub const MAX_BINS: usize = 50;

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub default_color: String,
    pub default_bins: usize,
    pub export_width: u32,
    pub export_height: u32,
    pub open_after_export: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_color: "skyblue".to_string(),
            default_bins: 10,
            export_width: 1000,
            export_height: 750,
            open_after_export: false,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl AppConfig {
    /// Resolve the config path and load it. Never fails: problems are logged
    /// and defaults are used instead.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path).context("reading config file")?;
        Self::from_json(&text)
    }

    /// Parse config JSON and normalise out-of-range values.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text).context("parsing config JSON")?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.default_bins = self.default_bins.clamp(MIN_BINS, MAX_BINS);
        self.export_width = self.export_width.max(200);
        self.export_height = self.export_height.max(150);
        if self.default_color.trim().is_empty() {
            self.default_color = Self::default().default_color;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = AppConfig::from_json(r#"{ "default_color": "tomato" }"#).unwrap();
        assert_eq!(config.default_color, "tomato");
        assert_eq!(config.default_bins, 10);
        assert_eq!(config.export_width, 1000);
        assert!(!config.open_after_export);
    }

    #[test]
    fn bins_are_clamped() {
        let high = AppConfig::from_json(r#"{ "default_bins": 500 }"#).unwrap();
        assert_eq!(high.default_bins, MAX_BINS);
        let low = AppConfig::from_json(r#"{ "default_bins": 0 }"#).unwrap();
        assert_eq!(low.default_bins, MIN_BINS);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("data_visualizer_no_such_config.json");
        assert!(AppConfig::from_file(&path).is_err());
    }
}
