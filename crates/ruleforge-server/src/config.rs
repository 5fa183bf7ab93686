//! Server configuration
//!
//! Read from `config/server.{yaml,toml,json}` when present, then overridden by
//! `RULEFORGE_*` environment variables (a `.env` file is honored). Nested
//! keys use `__`, e.g. `RULEFORGE_REPOSITORY__SOURCE=filesystem`.

use ruleforge_repository::RepositoryConfig;
use ruleforge_sdk::EngineConfig;
use serde::{Deserialize, Serialize};

/// Default configuration file, without extension
pub const DEFAULT_CONFIG_FILE: &str = "config/server";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Where rules are stored
    pub repository: RepositoryConfig,

    /// Nesting limit for rule text
    pub max_depth: usize,

    /// Validate rules against the attribute catalog
    pub validate_rules: bool,

    /// Log level
    pub log_level: String,

    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            repository: RepositoryConfig::memory(),
            max_depth: engine.max_depth,
            validate_rules: engine.validate_rules,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and config file
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from `path` (optional) and the environment
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("RULEFORGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to read config: {}", e))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?;

        config
            .repository
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid repository config: {}", e))?;

        Ok(config)
    }

    /// Engine settings derived from this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_max_depth(self.max_depth)
            .with_validation(self.validate_rules)
            .with_repository(self.repository.clone())
    }
}
