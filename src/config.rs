/// Configuration for the skill checks
///
/// Thresholds default to the values the checks were tuned with. A JSON file
/// passed through `--config` may override any subset of them.

use std::path::Path;

use log::{error, info};
use serde::{Deserialize, Serialize};

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Thresholds for the context analyzer
    pub context: ContextConfig,
    /// Thresholds for the design validator
    pub design: DesignConfig,
}

/// Context analyzer thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Files with more lines than this are reported as oversized
    pub max_file_lines: usize,
    /// Lines longer than this count as long lines
    pub max_line_length: usize,
    /// More long lines than this in one file raise an issue
    pub max_long_lines: usize,
    /// Directory names pruned from every walk
    pub ignore_dirs: Vec<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_file_lines: 300,
            max_line_length: 120,
            max_long_lines: 5,
            ignore_dirs: vec![".git".to_string(), "node_modules".to_string()],
        }
    }
}

/// Design validator thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// Spacing grid unit in pixels
    pub base_unit: u32,
    /// More hardcoded colors than this in a stylesheet raise a warning
    pub max_hardcoded_colors: usize,
    /// More inline style blocks than this in a component raise a warning
    pub max_inline_styles: usize,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            base_unit: 8,
            max_hardcoded_colors: 10,
            max_inline_styles: 3,
        }
    }
}

/// Load configuration from file if provided
///
/// A missing or malformed file is logged and the defaults are used instead,
/// so a bad `--config` never aborts a scan.
///
/// # Arguments
///
/// * `config_path` - Optional path to a JSON configuration file
///
/// # Returns
///
/// The effective configuration
pub fn load_config(config_path: Option<&Path>) -> Config {
    let Some(path) = config_path else {
        return Config::default();
    };

    if !path.exists() {
        error!("Configuration file not found: {}", path.display());
        return Config::default();
    }

    let config_str = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to read configuration file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&config_str) {
        Ok(config) => {
            info!("Loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            error!("Invalid JSON in configuration file: {}", e);
            Config::default()
        }
    }
}
