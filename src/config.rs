// src/config.rs

//! Manages board configuration: loading, resolving defaults, and validation.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use tracing::warn;

/// The three independent time knobs of the presence engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PresenceConfig {
    /// A client with a heartbeat no older than this counts as active.
    #[serde(with = "humantime_serde", default = "default_active_window")]
    pub active_window: Duration,
    /// A client silent for longer than this is evicted by the next prune pass.
    #[serde(with = "humantime_serde", default = "default_stale_window")]
    pub stale_window: Duration,
    /// Minimum time between two prune passes.
    #[serde(with = "humantime_serde", default = "default_prune_interval")]
    pub prune_interval: Duration,
    /// If true, a timer task also drives pruning, in addition to request traffic.
    #[serde(default)]
    pub background_prune: bool,
}

fn default_active_window() -> Duration {
    Duration::from_secs(180)
}
fn default_stale_window() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}
fn default_prune_interval() -> Duration {
    Duration::from_secs(300)
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            active_window: default_active_window(),
            stale_window: default_stale_window(),
            prune_interval: default_prune_interval(),
            background_prune: false,
        }
    }
}

/// Configuration for the Prometheus metrics exporter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// If true, an HTTP server will be started to expose Prometheus metrics.
    #[serde(default)]
    pub enabled: bool,
    /// The port for the Prometheus metrics server.
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

fn default_metrics_port() -> u16 {
    9464
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_metrics_port(),
        }
    }
}

/// A raw representation of the config file before validation.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    presence: PresenceConfig,
    #[serde(default)]
    metrics: MetricsConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5001
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Represents the final, validated board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            presence: PresenceConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid config in '{path}'"))
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw_config: RawConfig =
            toml::from_str(contents).context("Failed to parse TOML configuration")?;

        let config = Config {
            host: raw_config.host,
            port: raw_config.port,
            log_level: raw_config.log_level,
            presence: raw_config.presence,
            metrics: raw_config.metrics,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the resolved configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("port cannot be 0"));
        }
        if self.host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }

        let presence = &self.presence;
        if presence.active_window.is_zero() {
            return Err(anyhow!("presence.active_window cannot be 0"));
        }
        if presence.stale_window.is_zero() {
            return Err(anyhow!("presence.stale_window cannot be 0"));
        }
        if presence.prune_interval.is_zero() {
            return Err(anyhow!("presence.prune_interval cannot be 0"));
        }
        if presence.stale_window < presence.active_window {
            return Err(anyhow!(
                "presence.stale_window ({:?}) cannot be shorter than presence.active_window ({:?})",
                presence.stale_window,
                presence.active_window
            ));
        }
        if presence.prune_interval > presence.stale_window {
            warn!(
                "presence.prune_interval ({:?}) is longer than presence.stale_window ({:?}); stale clients may linger for up to one extra interval.",
                presence.prune_interval, presence.stale_window
            );
        }

        if self.metrics.enabled {
            if self.metrics.port == 0 {
                return Err(anyhow!("metrics.port cannot be 0"));
            }
            if self.metrics.port == self.port {
                return Err(anyhow!(
                    "metrics.port cannot be the same as the main server port"
                ));
            }
        }
        Ok(())
    }
}
