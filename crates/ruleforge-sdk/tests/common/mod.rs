//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use ruleforge_sdk::{
    Attributes, DataType, InMemoryAttributeCatalog, RuleEngine, RuleEngineBuilder, Value,
};
use std::sync::Arc;

/// Test helper to create a RuleEngine preloaded with rules
pub struct TestEngine {
    rules: Vec<(String, String)>,
    attributes: Vec<(String, DataType)>,
    validate: bool,
}

impl TestEngine {
    /// Create an empty test engine
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            attributes: Vec::new(),
            validate: false,
        }
    }

    /// Add a rule created before the engine is handed out
    pub fn with_rule(mut self, name: &str, text: &str) -> Self {
        self.rules.push((name.to_string(), text.to_string()));
        self
    }

    /// Declare an attribute and turn on validation
    pub fn with_attribute(mut self, name: &str, data_type: DataType) -> Self {
        self.attributes.push((name.to_string(), data_type));
        self.validate = true;
        self
    }

    /// Build the engine over an in-memory store
    pub async fn build(self) -> RuleEngine {
        let mut builder = RuleEngineBuilder::new().enable_validation(self.validate);
        if !self.attributes.is_empty() {
            let catalog = self
                .attributes
                .into_iter()
                .fold(InMemoryAttributeCatalog::new(), |catalog, (name, data_type)| {
                    catalog.with_attribute(name, data_type)
                });
            builder = builder.with_catalog(Arc::new(catalog));
        }

        let engine = builder.build().await.expect("Failed to build engine");
        for (name, text) in &self.rules {
            engine
                .create(name, text)
                .await
                .unwrap_or_else(|e| panic!("Failed to create rule '{}': {}", name, e));
        }
        engine
    }
}

/// Build attributes from `(name, value)` pairs
pub fn attrs<const N: usize>(pairs: [(&str, Value); N]) -> Attributes {
    pairs.into_iter().collect()
}
