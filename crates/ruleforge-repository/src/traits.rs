//! Core trait definitions for the repository pattern
//!
//! - [`RuleStore`]: load and persist named rules with optimistic concurrency
//! - [`AttributeCatalog`]: declared types of the attributes rules refer to
//! - [`CacheableRepository`]: cache management for stores that cache reads
//!
//! # Examples
//!
//! ```no_run
//! use ruleforge_parser::RuleParser;
//! use ruleforge_repository::{InMemoryRuleStore, RuleStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryRuleStore::new();
//! let rule = RuleParser::parse_rule("adult", "age >= 18")?;
//!
//! // A new rule must not exist yet
//! store.put(&rule, None).await?;
//!
//! // Replacing it requires the version being replaced
//! let revised = rule.revise("age >= 21", ruleforge_parser::ExpressionParser::parse("age >= 21")?);
//! store.put(&revised, Some(rule.version)).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use ruleforge_core::ast::Rule;
use ruleforge_core::types::{AttributeDefinition, DataType};

use crate::{CacheStats, RepositoryResult};

/// Storage for named rules
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` and must allow at most one writer
/// per rule name at a time. The version check in [`RuleStore::put`] happens
/// under that exclusion.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Load a rule by name
    async fn get(&self, name: &str) -> RepositoryResult<Option<Rule>>;

    /// Store `rule` under `rule.name`
    ///
    /// `expected_version` is the version the caller believes is stored:
    /// `None` if the rule must not exist yet. Any other stored state fails
    /// with [`RepositoryError::Conflict`](crate::RepositoryError::Conflict)
    /// and leaves the store unchanged.
    async fn put(&self, rule: &Rule, expected_version: Option<u64>) -> RepositoryResult<()>;

    /// Names of all stored rules, sorted
    async fn list_names(&self) -> RepositoryResult<Vec<String>>;
}

/// Declared attribute types
#[async_trait]
pub trait AttributeCatalog: Send + Sync {
    /// Declared type of an attribute, `None` if undeclared
    async fn declared_type(&self, name: &str) -> RepositoryResult<Option<DataType>>;

    /// All declared attributes, sorted by name
    async fn list_attributes(&self) -> RepositoryResult<Vec<AttributeDefinition>>;
}

/// Extension trait for stores that cache reads
#[async_trait]
pub trait CacheableRepository: Send + Sync {
    /// Clear all cached entries
    async fn clear_cache(&self);

    /// Clear the cached entry for one name
    async fn clear_cache_entry(&self, name: &str);

    /// Get cache statistics
    ///
    /// Returns information about cache hits, misses, and size
    fn cache_stats(&self) -> CacheStats;

    /// Enable or disable caching
    fn set_cache_enabled(&self, enabled: bool);

    /// Check if caching is enabled
    fn is_cache_enabled(&self) -> bool;
}

/// Check the stored version against the version a writer expected
pub(crate) fn check_version(
    name: &str,
    expected: Option<u64>,
    actual: Option<u64>,
) -> Result<(), crate::ConflictError> {
    if expected == actual {
        Ok(())
    } else {
        Err(crate::ConflictError {
            name: name.to_string(),
            expected,
            actual,
        })
    }
}
