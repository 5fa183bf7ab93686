//! In-memory rule store and attribute catalog
//!
//! Used for tests and for servers that do not need rules to survive a
//! restart.

use async_trait::async_trait;
use ruleforge_core::ast::Rule;
use ruleforge_core::types::{AttributeDefinition, DataType};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::traits::{check_version, AttributeCatalog, RuleStore};
use crate::RepositoryResult;

/// Rule store backed by a `HashMap`
///
/// Writers hold the write lock across the version check and the insert.
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    rules: RwLock<HashMap<String, Rule>>,
}

impl InMemoryRuleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rules
    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn get(&self, name: &str) -> RepositoryResult<Option<Rule>> {
        Ok(self.rules.read().await.get(name).cloned())
    }

    async fn put(&self, rule: &Rule, expected_version: Option<u64>) -> RepositoryResult<()> {
        let mut rules = self.rules.write().await;
        let actual = rules.get(&rule.name).map(|r| r.version);
        check_version(&rule.name, expected_version, actual).map_err(|conflict| {
            tracing::warn!("Rejected write to rule '{}': {}", rule.name, conflict);
            conflict
        })?;

        rules.insert(rule.name.clone(), rule.clone());
        tracing::debug!("Stored rule '{}' at version {}", rule.name, rule.version);
        Ok(())
    }

    async fn list_names(&self) -> RepositoryResult<Vec<String>> {
        let mut names: Vec<String> = self.rules.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// Attribute catalog with a fixed set of declarations
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttributeCatalog {
    attributes: BTreeMap<String, DataType>,
}

impl InMemoryAttributeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to declare an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.attributes.insert(name.into(), data_type);
        self
    }

    /// Declared type of an attribute, without going through the async trait
    pub fn get(&self, name: &str) -> Option<DataType> {
        self.attributes.get(name).copied()
    }

    /// Declarations as attribute definitions, sorted by name
    pub fn definitions(&self) -> Vec<AttributeDefinition> {
        self.attributes
            .iter()
            .map(|(name, data_type)| AttributeDefinition::new(name.clone(), *data_type))
            .collect()
    }
}

impl FromIterator<AttributeDefinition> for InMemoryAttributeCatalog {
    fn from_iter<I: IntoIterator<Item = AttributeDefinition>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|def| (def.name, def.data_type))
                .collect(),
        }
    }
}

#[async_trait]
impl AttributeCatalog for InMemoryAttributeCatalog {
    async fn declared_type(&self, name: &str) -> RepositoryResult<Option<DataType>> {
        Ok(self.get(name))
    }

    async fn list_attributes(&self) -> RepositoryResult<Vec<AttributeDefinition>> {
        Ok(self.definitions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RepositoryError;
    use ruleforge_parser::{ExpressionParser, RuleParser};

    #[tokio::test]
    async fn test_put_and_get() {
        let store = InMemoryRuleStore::new();
        let rule = RuleParser::parse_rule("adult", "age >= 18").unwrap();

        store.put(&rule, None).await.unwrap();

        assert_eq!(store.get("adult").await.unwrap(), Some(rule));
        assert_eq!(store.get("missing").await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_put_existing_without_version_conflicts() {
        let store = InMemoryRuleStore::new();
        let rule = RuleParser::parse_rule("adult", "age >= 18").unwrap();
        store.put(&rule, None).await.unwrap();

        let err = store.put(&rule, None).await.unwrap_err();
        let conflict = err.as_conflict().unwrap();
        assert_eq!(conflict.expected, None);
        assert_eq!(conflict.actual, Some(1));
    }

    #[tokio::test]
    async fn test_stale_version_conflicts() {
        let store = InMemoryRuleStore::new();
        let v1 = RuleParser::parse_rule("adult", "age >= 18").unwrap();
        store.put(&v1, None).await.unwrap();

        let v2 = v1.revise("age >= 21", ExpressionParser::parse("age >= 21").unwrap());
        store.put(&v2, Some(1)).await.unwrap();

        // A second writer still holding version 1
        let other = v1.revise("age >= 30", ExpressionParser::parse("age >= 30").unwrap());
        let err = store.put(&other, Some(1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let stored = store.get("adult").await.unwrap().unwrap();
        assert_eq!(stored.source_text, "age >= 21");
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_expected_version_for_missing_rule_conflicts() {
        let store = InMemoryRuleStore::new();
        let rule = RuleParser::parse_rule("adult", "age >= 18").unwrap();
        assert!(store.put(&rule, Some(1)).await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_list_names_sorted() {
        let store = InMemoryRuleStore::new();
        for name in ["zeta", "alpha", "mid"] {
            let rule = RuleParser::parse_rule(name, "x == 1").unwrap();
            store.put(&rule, None).await.unwrap();
        }
        assert_eq!(store.list_names().await.unwrap(), vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_attribute_catalog() {
        let catalog = InMemoryAttributeCatalog::new()
            .with_attribute("country", DataType::String)
            .with_attribute("age", DataType::Integer);

        assert_eq!(
            catalog.declared_type("age").await.unwrap(),
            Some(DataType::Integer)
        );
        assert_eq!(catalog.declared_type("vip").await.unwrap(), None);

        let names: Vec<String> = catalog
            .list_attributes()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["age", "country"]);
    }
}
