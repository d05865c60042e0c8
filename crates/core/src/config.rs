//! Application configuration for Opsdeck
//!
//! Loaded from `opsdeck.toml` next to the binary. A missing file is not
//! an error; every section has working defaults so the console can
//! start against a local backend out of the box.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, ConsoleResult};
use crate::traits::Validatable;

/// Default configuration file name
pub const CONFIG_FILE: &str = "opsdeck.toml";

// ============================================================================
// Sections
// ============================================================================

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the admin backend; all resource routes resolve
    /// against it, and CSRF tokens are only echoed to this origin.
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
        }
    }
}

/// Desktop window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 820.0,
        }
    }
}

// ============================================================================
// AppConfig
// ============================================================================

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub window: WindowConfig,
    /// tracing-subscriber env-filter directive, e.g. "info" or
    /// "opsdeck=debug,reqwest=warn"
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> ConsoleResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConsoleError::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to TOML
    pub fn to_toml(&self) -> ConsoleResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a file
    pub fn save_to(&self, path: impl AsRef<Path>) -> ConsoleResult<()> {
        let raw = self.to_toml()?;
        std::fs::write(path.as_ref(), raw)?;
        Ok(())
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> ConsoleResult<()> {
        if !self.server.base_url.starts_with("http://") && !self.server.base_url.starts_with("https://")
        {
            return Err(ConsoleError::config(
                "server.base_url must start with http:// or https://",
            ));
        }
        if self.window.width < 400.0 || self.window.height < 300.0 {
            return Err(ConsoleError::config("window size is too small"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: AppConfig = toml::from_str(
            r#"
            log_filter = "opsdeck=debug"

            [server]
            base_url = "https://admin.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://admin.example.com");
        assert_eq!(config.log_filter.as_deref(), Some("opsdeck=debug"));
        // window section absent → defaults
        assert_eq!(config.window, WindowConfig::default());
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "ftp://example.com".to_string();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_validation_rejects_tiny_window() {
        let mut config = AppConfig::default();
        config.window.width = 100.0;
        assert!(!config.is_valid());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let raw = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&raw).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = AppConfig::load_from("definitely/not/a/real/opsdeck.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
