//! Configuration file
//!
//! A JSON object; every field is optional:
//!
//! ```json
//! { "data_dir": "db", "pretty": true, "sync_writes": false, "log_level": "warn" }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::store::StoreOptions;

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database directory
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Pretty-print table files
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// fsync each snapshot before it replaces the table file
    #[serde(default)]
    pub sync_writes: bool,

    /// Minimum log severity: trace, info, warn, error or off
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> String {
    "db".to_string()
}
fn default_pretty() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            pretty: default_pretty(),
            sync_writes: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::from_json(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        match fs::metadata(path) {
            Ok(_) => Self::load(path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::config_error(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        self.severity()?;
        Ok(())
    }

    /// Replace `data_dir` when a command-line override is given
    pub fn with_data_dir(mut self, data_dir: Option<&Path>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir.display().to_string();
        }
        self
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(e))
    }

    /// Snapshot write options
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            pretty: self.pretty,
            sync_writes: self.sync_writes,
        }
    }
}
