//! Configuration loading for the dashboard.
//! Reads trialdqi.toml from the current directory or the path in TRIALDQI_CONFIG.
//! Every field has a default, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trialdqi_common::{Result, TrialDqiError};

pub const CONFIG_ENV: &str = "TRIALDQI_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "trialdqi.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter(), json: false }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Seed for the DQI breakdown draws. Unset means entropy.
    #[serde(default)]
    pub breakdown_seed: Option<u64>,
    /// Alerts shown on the study dashboard panel.
    #[serde(default = "default_alert_panel_limit")]
    pub alert_panel_limit: usize,
}

fn default_alert_panel_limit() -> usize { 6 }

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { breakdown_seed: None, alert_panel_limit: default_alert_panel_limit() }
    }
}


impl Config {
    /// Load configuration from trialdqi.toml.
    /// Checks TRIALDQI_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            TrialDqiError::Config(msg) => TrialDqiError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| TrialDqiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(TrialDqiError::Config("server.port must be non-zero".to_string()));
        }
        if self.metrics.alert_panel_limit == 0 {
            return Err(TrialDqiError::Config(
                "metrics.alert_panel_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
