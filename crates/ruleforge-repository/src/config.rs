//! Repository configuration types
//!
//! Selects where rules are kept (memory or a directory of YAML files).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repository source type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositorySource {
    /// Rules live in process memory and are lost on shutdown
    #[default]
    Memory,
    /// One YAML document per rule under `base_path`
    FileSystem,
}

/// Repository configuration
///
/// # Examples
///
/// ```rust
/// use ruleforge_repository::RepositoryConfig;
///
/// // File system repository
/// let config = RepositoryConfig::file_system("repository").with_cache_ttl_secs(60);
///
/// // Memory repository (for testing)
/// let config = RepositoryConfig::memory();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Configuration source type
    #[serde(default)]
    pub source: RepositorySource,

    /// File system base path (required for FileSystem source)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Read cache TTL for the file system store; `0` disables the cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,
}

impl RepositoryConfig {
    /// Create a file system repository configuration
    pub fn file_system(path: impl Into<String>) -> Self {
        Self {
            source: RepositorySource::FileSystem,
            base_path: Some(path.into()),
            cache_ttl_secs: None,
        }
    }

    /// Create a memory repository configuration
    pub fn memory() -> Self {
        Self {
            source: RepositorySource::Memory,
            base_path: None,
            cache_ttl_secs: None,
        }
    }

    /// Set the cache TTL in seconds
    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = Some(secs);
        self
    }

    /// Configured cache TTL, if any
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    ///
    /// Returns an error if required fields are missing for the selected source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.source {
            RepositorySource::FileSystem => {
                if self.base_path.as_deref().map_or(true, str::is_empty) {
                    return Err(ConfigError::MissingField {
                        source: "filesystem".to_string(),
                        field: "base_path".to_string(),
                    });
                }
            }
            RepositorySource::Memory => {}
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required field is missing for the selected source
    MissingField { source: String, field: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField { source, field } => {
                write!(f, "{} source requires {} to be set", source, field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
