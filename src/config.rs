// src/config.rs

//! Manages bridge configuration: loading, defaults, and validation.

use crate::core::protocol::frame::DEFAULT_MAX_LINE_LENGTH;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;

/// Settings for the autograder results views.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AutograderConfig {
    /// The maximum number of tests a single view may hold. `0` disables the limit.
    #[serde(default = "default_max_tests_per_view")]
    pub max_tests_per_view: usize,
}

impl Default for AutograderConfig {
    fn default() -> Self {
        Self {
            max_tests_per_view: default_max_tests_per_view(),
        }
    }
}

fn default_max_tests_per_view() -> usize {
    4096
}

/// Configuration for the Prometheus metrics exporter.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MetricsConfig {
    /// If true, an HTTP server will be started to expose Prometheus metrics.
    #[serde(default)]
    pub enabled: bool,
    /// The port for the Prometheus metrics server.
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

fn default_metrics_port() -> u16 {
    8879
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
    #[serde(default = "default_max_clients")]
    max_clients: usize,
    #[serde(default = "default_max_line_length")]
    max_line_length: usize,
    #[serde(default)]
    autograder: AutograderConfig,
    #[serde(default)]
    metrics: MetricsConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    7879
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_clients() -> usize {
    256
}
fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

/// Represents the final, validated bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub max_clients: usize,
    pub max_line_length: usize,
    #[serde(default)]
    pub autograder: AutograderConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_clients: default_max_clients(),
            max_line_length: default_max_line_length(),
            autograder: AutograderConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid configuration in '{path}'"))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(contents).context("Failed to parse TOML")?;

        let config = Config {
            host: raw.host,
            port: raw.port,
            log_level: raw.log_level,
            max_clients: raw.max_clients,
            max_line_length: raw.max_line_length,
            autograder: raw.autograder,
            metrics: raw.metrics,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure logical consistency.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("port cannot be 0"));
        }
        if self.host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }
        if self.max_clients == 0 {
            return Err(anyhow!("max_clients cannot be 0"));
        }
        if self.max_line_length < 64 {
            return Err(anyhow!("max_line_length must be at least 64 bytes"));
        }
        if self.metrics.enabled {
            if self.metrics.port == 0 {
                return Err(anyhow!("metrics.port cannot be 0 when metrics are enabled"));
            }
            if self.metrics.port == self.port {
                return Err(anyhow!("metrics.port must differ from the bridge port"));
            }
        }
        if self.autograder.max_tests_per_view == 0 {
            warn!("autograder.max_tests_per_view is 0; views will accept any number of tests.");
        }
        Ok(())
    }
}
