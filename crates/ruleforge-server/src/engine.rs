//! Rule engine initialization

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use ruleforge_sdk::{RuleEngine, RuleEngineBuilder};

/// Build the rule engine described by the server configuration
pub async fn init_engine(config: &ServerConfig) -> Result<RuleEngine> {
    tracing::info!(
        "Initializing rule engine with {:?} repository",
        config.repository.source
    );

    RuleEngineBuilder::new()
        .with_config(config.engine_config())
        .build()
        .await
        .context("Failed to build rule engine")
}
