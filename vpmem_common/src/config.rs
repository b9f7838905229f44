//! Configuration loading traits and types.
//!
//! The sizing tool takes every input on the command line, but a
//! [`SizingProfile`] TOML file can pre-seed the partition description and
//! the log level so recurring layouts do not have to be retyped.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vpmem_common::config::{ConfigError, ConfigLoader, SizingProfile};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let profile = SizingProfile::load(Path::new("lpar01.toml"))?;
//!     profile.validate()?;
//!     println!("LUNs: {:?}", profile.partition.luns);
//!     Ok(())
//! }
//! ```

use crate::partition::PartitionKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information, including every search step.
    Debug,
    /// General information about the computed plan.
    #[default]
    Info,
    /// Advisories such as the Linux 64TB footprint warning.
    Warn,
    /// Error messages only.
    Error,
}

impl LogLevel {
    /// Matching `tracing` filter.
    pub const fn as_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Partition description; every field may be overridden from the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionSection {
    /// Partition family.
    #[serde(default)]
    pub kind: Option<PartitionKind>,

    /// Desired DRAM in GB.
    #[serde(default)]
    pub memory_gb: Option<u64>,

    /// LUN specifications, `"N"` or `"CxN"` in GB.
    #[serde(default)]
    pub luns: Vec<String>,
}

/// Contents of a `--config` profile file.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
///
/// [partition]
/// kind = "linux"
/// memory_gb = 1000
/// luns = ["6000", "3x1000"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizingProfile {
    /// Shared settings.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Partition description.
    #[serde(default)]
    pub partition: PartitionSection,
}

impl SizingProfile {
    /// Validate the profile.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `memory_gb` is present and zero
    /// - a LUN entry is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.partition.memory_gb == Some(0) {
            return Err(ConfigError::ValidationError(
                "partition.memory_gb must be positive".to_string(),
            ));
        }
        if let Some(pos) = self.partition.luns.iter().position(|l| l.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "partition.luns[{pos}] is empty"
            )));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
