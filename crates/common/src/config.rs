// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

// Configuration structures for Wake Console

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Connection settings for the remote control service.
///
/// The base address is resolved once at startup; nothing is re-resolved
/// per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteServiceConfig {
    /// Service hostname or IP (e.g. "127.0.0.1" or "wol.lan")
    #[serde(default = "default_host")]
    pub host: String,

    /// Service port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds (0 = no timeout)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Console configuration, persisted as TOML in the user config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub service: RemoteServiceConfig,

    /// Status poll interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Persisted UI theme preference
    #[serde(default)]
    pub theme: Theme,
}

/// UI theme preference, persisted across runs.
///
/// Kept entirely outside the status/action core; presentation layers read
/// it at startup and write it back on change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

// Default value functions
fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    13579
}

fn default_request_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    10
}

impl Default for RemoteServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            service: RemoteServiceConfig::default(),
            poll_interval_secs: default_poll_interval(),
            theme: Theme::default(),
        }
    }
}

impl RemoteServiceConfig {
    /// Base URL for all service requests
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl ConsoleConfig {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists. `WAKE_CONSOLE_HOST` and `WAKE_CONSOLE_PORT`
    /// override the service address either way.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let contents = fs::read_to_string(&path)?;
                toml::from_str(&contents)?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Write configuration back to the default path, creating the
    /// directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {e}")))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("wake-console").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("WAKE_CONSOLE_HOST") {
            if !host.is_empty() {
                self.service.host = host;
            }
        }
        if let Ok(port) = std::env::var("WAKE_CONSOLE_PORT") {
            match port.parse() {
                Ok(port) => self.service.port = port,
                Err(_) => tracing::warn!("Ignoring invalid WAKE_CONSOLE_PORT: {port}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.service.host, "localhost");
        assert_eq!(config.service.port, 13579);
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_base_url() {
        let mut service = RemoteServiceConfig::default();
        assert_eq!(service.base_url(), "http://localhost:13579");

        service.host = "192.168.0.10".to_string();
        service.port = 8080;
        assert_eq!(service.base_url(), "http://192.168.0.10:8080");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            poll_interval_secs = 30

            [service]
            host = "wol.lan"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.host, "wol.lan");
        assert_eq!(config.service.port, 13579);
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ConsoleConfig::default();
        config.theme = Theme::Light;
        config.service.port = 9000;

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: ConsoleConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.theme, Theme::Light);
        assert_eq!(parsed.service.port, 9000);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
