//! Configuration file loading with precedence handling.

use crate::layout::LayoutOptions;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LCV_CONFIG";
/// Environment variable overriding follow mode (`true`/`false`/`1`/`0`).
pub const FOLLOW_ENV: &str = "LCV_FOLLOW";
/// Environment variable overriding the demo comment rate.
pub const DEMO_RATE_ENV: &str = "LCV_DEMO_RATE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting is syntactically fine but unusable.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/lcv/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Estimated height of an unmeasured comment row, in terminal lines.
    #[serde(default)]
    pub min_row_height: Option<f64>,

    /// Start in follow (auto-scroll) mode.
    #[serde(default)]
    pub follow: Option<bool>,

    /// Keep one placeholder row while no comment has arrived.
    #[serde(default)]
    pub empty_placeholder: Option<bool>,

    /// Distance from the bottom, in lines, that re-enables follow mode.
    #[serde(default)]
    pub rearm_threshold: Option<f64>,

    /// Comments the demo platform emits per tick.
    #[serde(default)]
    pub demo_rate: Option<u32>,

    /// Event loop tick in milliseconds.
    #[serde(default)]
    pub tick_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Estimated row height.
    pub min_row_height: f64,
    /// Follow mode.
    pub follow: bool,
    /// Placeholder row while empty.
    pub empty_placeholder: bool,
    /// Follow re-arm distance; `None` means one estimated row.
    pub rearm_threshold: Option<f64>,
    /// Demo comments per tick.
    pub demo_rate: u32,
    /// Event loop tick.
    pub tick_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            min_row_height: 1.0,
            follow: true,
            empty_placeholder: true,
            rearm_threshold: None,
            demo_rate: 1,
            tick_ms: 250,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject values the layout engine or event loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_row_height.is_finite() && self.min_row_height > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "min_row_height",
                reason: format!("must be a positive number, got {}", self.min_row_height),
            });
        }
        if let Some(threshold) = self.rearm_threshold {
            if !(threshold.is_finite() && threshold >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: "rearm_threshold",
                    reason: format!("must be a non-negative number, got {}", threshold),
                });
            }
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Layout engine options derived from this configuration.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            min_row_height: self.min_row_height,
            auto_scroll: self.follow,
            empty_placeholder: self.empty_placeholder,
            rearm_threshold: self.rearm_threshold,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/lcv/lcv.log` on Linux, the platform state
/// directory elsewhere, or `lcv.log` in the current directory as a fallback.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("lcv").join("lcv.log"),
        None => PathBuf::from("lcv.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path: `~/.config/lcv/config.toml` on Unix.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lcv").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LCV_CONFIG` environment variable
/// 3. Default path `~/.config/lcv/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        min_row_height: config.min_row_height.unwrap_or(defaults.min_row_height),
        follow: config.follow.unwrap_or(defaults.follow),
        empty_placeholder: config
            .empty_placeholder
            .unwrap_or(defaults.empty_placeholder),
        rearm_threshold: config.rearm_threshold.or(defaults.rearm_threshold),
        demo_rate: config.demo_rate.unwrap_or(defaults.demo_rate),
        tick_ms: config.tick_ms.unwrap_or(defaults.tick_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LCV_FOLLOW`: follow mode
/// - `LCV_DEMO_RATE`: demo comments per tick
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(follow) = std::env::var(FOLLOW_ENV).ok().and_then(|v| parse_bool(&v)) {
        config.follow = follow;
    }

    if let Some(rate) = std::env::var(DEMO_RATE_ENV)
        .ok()
        .and_then(|v| v.trim().parse().ok())
    {
        config.demo_rate = rate;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually
/// passed are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    follow_override: Option<bool>,
    rate_override: Option<u32>,
    min_row_height_override: Option<f64>,
) -> ResolvedConfig {
    if let Some(follow) = follow_override {
        config.follow = follow;
    }

    if let Some(rate) = rate_override {
        config.demo_rate = rate;
    }

    if let Some(height) = min_row_height_override {
        config.min_row_height = height;
    }

    config
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
