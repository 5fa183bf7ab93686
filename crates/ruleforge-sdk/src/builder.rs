//! Builder pattern for RuleEngine

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::rule_engine::RuleEngine;
use ruleforge_parser::ExpressionParser;
use ruleforge_repository::{
    AttributeCatalog, CacheConfig, FileSystemAttributeCatalog, FileSystemRuleStore,
    InMemoryRuleStore, RepositoryConfig, RepositorySource, RuleStore,
};
use std::path::Path;
use std::sync::Arc;

/// Builder for RuleEngine
///
/// # Example
///
/// ```rust,no_run
/// use ruleforge_sdk::{RepositoryConfig, RuleEngineBuilder};
///
/// # async fn example() -> ruleforge_sdk::Result<()> {
/// // Rules kept as YAML files under ./repository/rules
/// let engine = RuleEngineBuilder::new()
///     .with_repository(RepositoryConfig::file_system("repository"))
///     .enable_validation(true)
///     .build()
///     .await?;
///
/// // In-memory (for testing)
/// let engine = RuleEngineBuilder::new().build().await?;
/// # Ok(())
/// # }
/// ```
pub struct RuleEngineBuilder {
    config: EngineConfig,
    store: Option<Arc<dyn RuleStore>>,
    catalog: Option<Arc<dyn AttributeCatalog>>,
}

impl RuleEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            store: None,
            catalog: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set repository configuration
    ///
    /// Ignored when a store is supplied directly with [`Self::with_store`].
    pub fn with_repository(mut self, config: RepositoryConfig) -> Self {
        self.config.repository = Some(config);
        self
    }

    /// Use an existing rule store
    ///
    /// A [`FileSystemRuleStore`] supplied here should read with the same depth
    /// limit as the engine, see [`FileSystemRuleStore::with_parser`].
    pub fn with_store(mut self, store: Arc<dyn RuleStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use an attribute catalog for validation
    pub fn with_catalog(mut self, catalog: Arc<dyn AttributeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the nesting limit for rule text
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Enable static validation against the attribute catalog
    pub fn enable_validation(mut self, enable: bool) -> Self {
        self.config.validate_rules = enable;
        self
    }

    /// Build the engine
    pub async fn build(self) -> Result<RuleEngine> {
        let RuleEngineBuilder {
            config,
            store,
            mut catalog,
        } = self;

        let store = match store {
            Some(store) => store,
            None => {
                let repository = config.repository.clone().unwrap_or_default();
                let parser = ExpressionParser::with_max_depth(config.max_depth);
                let (store, fs_catalog) = Self::open_repository(&repository, parser).await?;
                if catalog.is_none() {
                    catalog = fs_catalog;
                }
                store
            }
        };

        if config.validate_rules && catalog.is_none() {
            tracing::warn!("Rule validation is enabled but no attribute catalog is configured");
        }

        tracing::info!(
            "Rule engine ready (max_depth={}, validation={})",
            config.max_depth,
            config.validate_rules
        );

        Ok(RuleEngine::from_parts(config, store, catalog))
    }

    /// Open the store (and catalog, for file system sources) a config names
    async fn open_repository(
        config: &RepositoryConfig,
        parser: ExpressionParser,
    ) -> Result<(Arc<dyn RuleStore>, Option<Arc<dyn AttributeCatalog>>)> {
        config
            .validate()
            .map_err(|e| SdkError::Config(e.to_string()))?;

        match config.source {
            RepositorySource::Memory => {
                tracing::info!("Using in-memory rule store");
                let store: Arc<dyn RuleStore> = Arc::new(InMemoryRuleStore::new());
                Ok((store, None))
            }
            RepositorySource::FileSystem => {
                let base_path = config.base_path.as_deref().unwrap_or_default();
                tokio::fs::create_dir_all(base_path).await.map_err(|e| {
                    SdkError::Config(format!("Failed to create {}: {}", base_path, e))
                })?;

                let cache_config = match config.cache_ttl() {
                    Some(ttl) if ttl.is_zero() => CacheConfig::disabled(),
                    Some(ttl) => CacheConfig::new().with_ttl(ttl),
                    None => CacheConfig::new(),
                };
                let store = FileSystemRuleStore::with_cache_config(Path::new(base_path), cache_config)?
                    .with_parser(parser);
                let catalog = FileSystemAttributeCatalog::load(store.root_path()).await?;

                tracing::info!("Using file system rule store at {}", store.root_path().display());
                let store: Arc<dyn RuleStore> = Arc::new(store);
                let catalog: Arc<dyn AttributeCatalog> = Arc::new(catalog);
                Ok((store, Some(catalog)))
            }
        }
    }
}

impl Default for RuleEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
