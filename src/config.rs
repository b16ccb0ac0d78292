// src/config.rs

//! Pipeline configuration file
//!
//! All keys are optional. Without a `[[version]]` list the built-in Yarn
//! release table is used.
//!
//! ```toml
//! entry_path = "mappings/mappings.tiny"
//! timeout_secs = 60
//!
//! [[version]]
//! id = "1.21.4"
//! url = "https://maven.fabricmc.net/net/fabricmc/yarn/1.21.4+build.8/yarn-1.21.4+build.8-mergedv2.jar"
//! ```

use crate::archive::MAPPINGS_ENTRY_PATH;
use crate::error::{Error, Result};
use crate::version::{VersionEntry, VersionTable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default HTTP timeout for archive downloads
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path of the mapping file inside each archive
    #[serde(default = "default_entry_path")]
    pub entry_path: String,

    /// Download timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Known releases, in batch order
    #[serde(default, rename = "version")]
    pub versions: Vec<VersionEntry>,
}

fn default_entry_path() -> String {
    MAPPINGS_ENTRY_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            entry_path: default_entry_path(),
            timeout_secs: default_timeout_secs(),
            versions: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.entry_path.trim().is_empty() {
            return Err(Error::Config("entry_path must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Version table described by this configuration
    pub fn version_table(&self) -> Result<VersionTable> {
        if self.versions.is_empty() {
            Ok(VersionTable::yarn_defaults())
        } else {
            VersionTable::new(self.versions.clone())
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_config_string(&content)
}

/// Parse configuration from a TOML string
pub fn parse_config_string(content: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig =
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    // Surface table errors at load time rather than on first conversion
    config.version_table()?;
    Ok(config)
}
