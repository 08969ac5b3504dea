//! Configuration Management
//!
//! Handles persistent configuration storage for ccimport.

use crate::confluent::client::DEFAULT_ENDPOINT;
use crate::confluent::http::RetryPolicy;
use crate::output::OutputFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Confluent Cloud API endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Retry ceiling for transient HTTP failures
    #[serde(default)]
    pub max_retries: Option<u32>,
    /// Resource kinds to enumerate when none are given on the command line
    #[serde(default)]
    pub resources: Option<Vec<String>>,
    /// Output format
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ccimport").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Could not read config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective endpoint (CLI > config > default)
    pub fn effective_endpoint(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Get effective retry policy (CLI > config > default)
    pub fn effective_retry_policy(&self, cli_max_retries: Option<u32>) -> RetryPolicy {
        let policy = RetryPolicy::default();
        match cli_max_retries.or(self.max_retries) {
            Some(max_retries) => policy.with_max_retries(max_retries),
            None => policy,
        }
    }

    /// Get effective resource selection (CLI > config > all)
    pub fn effective_resources(&self, cli: &[String]) -> Vec<String> {
        if !cli.is_empty() {
            return cli.to_vec();
        }
        self.resources.clone().unwrap_or_default()
    }

    /// Get effective output format (CLI > config > JSON)
    pub fn effective_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.format).unwrap_or_default()
    }
}
