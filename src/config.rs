use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds credited backwards from each position sample
    #[serde(default = "default_lookback_window")]
    pub lookback_window: f64,

    /// Maximum gap in seconds for two spans to be treated as contiguous
    #[serde(default = "default_merge_tolerance")]
    pub merge_tolerance: f64,

    /// Default percentage at which media counts as done, used when the host
    /// does not supply one
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: u8,

    /// Sampling interval for polling playback sources, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Playback source variant: "events" or "polling"
    #[serde(default = "default_source")]
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds for media info fetches and reports
    #[serde(default = "default_timeout")]
    pub connection_timeout: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", config_path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("watchspan").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lookback_window: default_lookback_window(),
            merge_tolerance: default_merge_tolerance(),
            completion_threshold: default_completion_threshold(),
            poll_interval_ms: default_poll_interval_ms(),
            source: default_source(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connection_timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_lookback_window() -> f64 { 0.5 }
fn default_merge_tolerance() -> f64 { 0.5 }
fn default_completion_threshold() -> u8 { 90 }
fn default_poll_interval_ms() -> u64 { 500 }
fn default_source() -> String { "events".to_string() }
fn default_timeout() -> u64 { 5 }
