//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_ERROR_MARKER=Erro                                            │
//! │     TALLY_DIVISION_SCALE=10                                            │
//! │     TALLY_LOG=debug                                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.tally.tally/tally.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! error_marker = "Error"
//! division_scale = 10
//! log_filter = "info,tally=debug"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tally_core::{Number, Settings, DEFAULT_DIVISION_SCALE, DEFAULT_ERROR_MARKER};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "tally.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Text shown on the display after an arithmetic error.
    pub error_marker: String,

    /// Fractional digits kept by division and percent.
    pub division_scale: u32,

    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Error marker: "Error"
    /// - Division scale: 10 digits
    /// - Log filter: info, debug for tally crates
    fn default() -> Self {
        ConfigState {
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
            division_scale: DEFAULT_DIVISION_SCALE,
            log_filter: "info,tally=debug".to_string(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads a config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Platform config file location, if a home directory is known.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "tally", "tally")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.error_marker.trim().is_empty() {
            return Err(ConfigError::Invalid("error_marker must not be empty".into()));
        }

        // The marker must never be mistaken for a result
        if looks_like_numeral(&self.error_marker) {
            return Err(ConfigError::Invalid(format!(
                "error_marker must not be a number, got: {}",
                self.error_marker
            )));
        }

        if self.division_scale > Number::MAX_SCALE {
            return Err(ConfigError::Invalid(format!(
                "division_scale must be at most {}, got: {}",
                Number::MAX_SCALE,
                self.division_scale
            )));
        }

        Ok(())
    }

    /// Controller settings derived from this configuration.
    pub fn settings(&self) -> Settings {
        Settings {
            error_marker: self.error_marker.clone(),
            division_scale: self.division_scale,
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `TALLY_*` overrides from any key/value source.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(marker) = lookup("TALLY_ERROR_MARKER") {
            debug!(error_marker = %marker, "Overriding error marker from environment");
            self.error_marker = marker;
        }

        if let Some(scale) = lookup("TALLY_DIVISION_SCALE") {
            match scale.trim().parse::<u32>() {
                Ok(scale) => {
                    debug!(division_scale = scale, "Overriding division scale from environment");
                    self.division_scale = scale;
                }
                Err(_) => warn!(value = %scale, "Ignoring invalid TALLY_DIVISION_SCALE"),
            }
        }

        if let Some(filter) = lookup("TALLY_LOG") {
            self.log_filter = filter;
        }
    }
}

/// Display-shaped text: optional `-`, digits, at most one `.`.
fn looks_like_numeral(text: &str) -> bool {
    let unsigned = text.trim().strip_prefix('-').unwrap_or(text.trim());
    unsigned.chars().any(|c| c.is_ascii_digit())
        && unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
        && unsigned.matches('.').count() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.error_marker, "Error");
        assert_eq!(config.division_scale, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "error_marker = \"Erro\"\n").unwrap();

        let config = ConfigState::from_file(&path).unwrap();
        assert_eq!(config.error_marker, "Erro");
        assert_eq!(config.division_scale, 10);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "division_scale = \"ten\"\n").unwrap();

        let err = ConfigState::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("TALLY_ERROR_MARKER", "Erro"),
            ("TALLY_DIVISION_SCALE", "6"),
            ("TALLY_LOG", "trace"),
        ]));

        assert_eq!(config.error_marker, "Erro");
        assert_eq!(config.division_scale, 6);
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn test_invalid_scale_override_is_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[("TALLY_DIVISION_SCALE", "lots")]));
        assert_eq!(config.division_scale, 10);
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState::default();

        config.error_marker = "  ".to_string();
        assert!(config.validate().is_err());

        config.error_marker = "42".to_string();
        assert!(config.validate().is_err());

        // Longer than any Number, still reads as a result
        config.error_marker = "1".repeat(40);
        assert!(config.validate().is_err());

        config.error_marker = "-0.".to_string();
        assert!(config.validate().is_err());

        config.error_marker = "Error".to_string();
        config.division_scale = 29;
        assert!(config.validate().is_err());

        config.division_scale = 28;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_settings() {
        let config = ConfigState {
            error_marker: "Erro".to_string(),
            division_scale: 3,
            ..ConfigState::default()
        };
        let settings = config.settings();
        assert_eq!(settings.error_marker, "Erro");
        assert_eq!(settings.division_scale, 3);
    }
}
