//! Configuration types for RuleEngine

use ruleforge_parser::ExpressionParser;
use ruleforge_repository::RepositoryConfig;
use serde::{Deserialize, Serialize};

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Nesting limit for rule text
    pub max_depth: usize,

    /// Check rules against the attribute catalog before storing them
    pub validate_rules: bool,

    /// Where rules are stored; in memory when unset
    pub repository: Option<RepositoryConfig>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            max_depth: ExpressionParser::DEFAULT_MAX_DEPTH,
            validate_rules: false,
            repository: None,
        }
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable static validation
    pub fn with_validation(mut self, enable: bool) -> Self {
        self.validate_rules = enable;
        self
    }

    /// Set repository configuration
    pub fn with_repository(mut self, repository: RepositoryConfig) -> Self {
        self.repository = Some(repository);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
