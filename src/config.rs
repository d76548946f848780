//! Configuration
//!
//! Defaults come from the embedded `config.toml`. A file at
//! `<config dir>/copy-all-chat/config.toml` replaces them when present.

use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

const CONFIG_TOML: &str = include_str!("../config.toml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub feedback: FeedbackConfig,
    pub clipboard: ClipboardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Per-turn capture timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { timeout_ms: 1800 }
    }
}

impl CaptureConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub toast_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self { toast_ms: 1400 }
    }
}

impl FeedbackConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

/// Which commit strategies are enabled
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub use_native: bool,
    pub use_host: bool,
    pub use_command: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            use_native: true,
            use_host: true,
            use_command: true,
        }
    }
}

/// Get the user override file path
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("copy-all-chat").join("config.toml"))
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// The configuration shipped with the binary
    pub fn embedded() -> Self {
        match Self::parse(CONFIG_TOML) {
            Ok(config) => config,
            Err(e) => {
                error!("Embedded configuration is invalid: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    /// User override if present and valid, embedded defaults otherwise
    pub fn load() -> Self {
        let Some(path) = user_config_path() else {
            return Self::embedded();
        };
        Self::load_or_embedded(&path)
    }

    fn load_or_embedded(path: &Path) -> Self {
        if !path.exists() {
            return Self::embedded();
        }
        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Ignoring configuration override: {}", e);
                Self::embedded()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_matches_defaults() {
        assert_eq!(Config::embedded(), Config::default());
        assert_eq!(
            Config::embedded().capture.timeout(),
            Duration::from_millis(1800)
        );
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::parse("[capture]\ntimeout_ms = 500\n").unwrap();
        assert_eq!(config.capture.timeout_ms, 500);
        assert_eq!(config.feedback, FeedbackConfig::default());
        assert!(config.clipboard.use_native);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        assert!(matches!(
            Config::parse("[capture]\ntimeout_ms = \"soon\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[clipboard]\nuse_command = false\n").unwrap();

        let config = Config::load_or_embedded(&path);
        assert!(!config.clipboard.use_command);
        assert!(config.clipboard.use_host);
    }

    #[test]
    fn test_broken_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();

        assert_eq!(Config::load_or_embedded(&path), Config::embedded());
    }

    #[test]
    fn test_missing_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Config::load_or_embedded(&dir.path().join("absent.toml")),
            Config::embedded()
        );
    }

    #[test]
    fn test_user_config_path() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("copy-all-chat/config.toml"));
        }
    }
}
