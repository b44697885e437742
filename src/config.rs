//! Configuration management for Toolgate
//!
//! This module handles loading, parsing, and validating configuration from
//! YAML files and environment variables. Environment variables take
//! precedence over file values for the settings the hosting agents
//! traditionally pass through the environment (`DATA_DIR`, `DATABASE_URL`,
//! `GITHUB_TOKEN`/`GH_TOKEN`, `KB_API_URL`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ToolgateError};
use crate::tools::github::DEFAULT_API_BASE;
use crate::tools::kubectl::DEFAULT_KUBECTL_TIMEOUT_SECS;

/// Main configuration structure for Toolgate
///
/// Holds the per-toolset settings consumed by the agent preset builders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data-analyst toolset configuration
    #[serde(default)]
    pub data_analyst: DataAnalystConfig,

    /// DevOps toolset configuration
    #[serde(default)]
    pub devops: DevopsConfig,

    /// Code-review toolset configuration
    #[serde(default)]
    pub code_review: CodeReviewConfig,

    /// Customer-support toolset configuration
    #[serde(default)]
    pub support: SupportConfig,
}

/// Data-analyst toolset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataAnalystConfig {
    /// Base directory the CSV sandbox is rooted at
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Default number of preview rows returned by load_csv
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// SQL backend connection string; simulated data when unset
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_preview_rows() -> usize {
    50
}

impl Default for DataAnalystConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            preview_rows: default_preview_rows(),
            database_url: None,
        }
    }
}

/// DevOps toolset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevopsConfig {
    /// Timeout for kubectl invocations, in seconds
    #[serde(default = "default_kubectl_timeout_secs")]
    pub kubectl_timeout_secs: u64,
}

fn default_kubectl_timeout_secs() -> u64 {
    DEFAULT_KUBECTL_TIMEOUT_SECS
}

impl Default for DevopsConfig {
    fn default() -> Self {
        Self {
            kubectl_timeout_secs: default_kubectl_timeout_secs(),
        }
    }
}

/// Code-review toolset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeReviewConfig {
    /// GitHub API base URL (useful for tests and local mocks)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bearer token, sourced from the environment and never serialized
    #[serde(skip)]
    pub token: Option<String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for CodeReviewConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: None,
        }
    }
}

/// Customer-support toolset configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupportConfig {
    /// Knowledge-base API root; canned results when unset
    #[serde(default)]
    pub kb_api_url: Option<String>,
}

impl Config {
    /// Loads configuration from a YAML file, then applies env overrides
    ///
    /// A missing file is not an error: defaults are used so the tools work
    /// out of the box, matching how the hosting agents behave without a
    /// config.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents)?
        } else {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Applies environment-variable overrides
    ///
    /// `DATA_DIR`, `DATABASE_URL`, `KB_API_URL`, and
    /// `GITHUB_TOKEN`/`GH_TOKEN` take precedence over file values.
    pub fn apply_env(&mut self) {
        if let Ok(data_dir) = std::env::var("DATA_DIR") {
            self.data_analyst.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            self.data_analyst.database_url = Some(database_url);
        }
        if let Ok(kb_api_url) = std::env::var("KB_API_URL") {
            self.support.kb_api_url = Some(kb_api_url);
        }
        self.code_review.token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok()
            .filter(|token| !token.is_empty());
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ToolgateError::Config` when a value is out of range or a
    /// configured URL does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.data_analyst.preview_rows == 0 {
            return Err(
                ToolgateError::Config("data_analyst.preview_rows must be at least 1".to_string())
                    .into(),
            );
        }
        if self.devops.kubectl_timeout_secs == 0 {
            return Err(ToolgateError::Config(
                "devops.kubectl_timeout_secs must be at least 1".to_string(),
            )
            .into());
        }
        Url::parse(&self.code_review.api_base).map_err(|err| {
            ToolgateError::Config(format!(
                "code_review.api_base is not a valid URL: {}",
                err
            ))
        })?;
        if let Some(kb_api_url) = &self.support.kb_api_url {
            Url::parse(kb_api_url).map_err(|err| {
                ToolgateError::Config(format!("support.kb_api_url is not a valid URL: {}", err))
            })?;
        }
        Ok(())
    }
}
