//! Core RuleEngine implementation

use super::names::validate_rule_name;
use crate::builder::RuleEngineBuilder;
use crate::combiner::{CombineError, CombineOp, Combiner};
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::validator::RuleValidator;
use ruleforge_core::ast::{Expression, Rule};
use ruleforge_core::AttributeDefinition;
use ruleforge_parser::ExpressionParser;
use ruleforge_repository::{AttributeCatalog, ConflictError, RuleStore};
use ruleforge_runtime::{Attributes, Evaluator};
use std::sync::Arc;

/// Rule engine facade
///
/// Owns no rules itself: every rule lives in the injected [`RuleStore`], so
/// several engines (or server instances) can share one store. Writes carry
/// the version they replace and fail with [`SdkError::Conflict`] if another
/// writer got there first.
pub struct RuleEngine {
    /// Rule storage
    store: Arc<dyn RuleStore>,

    /// Declared attribute types, used for validation
    catalog: Option<Arc<dyn AttributeCatalog>>,

    /// Parser configured with the depth limit
    parser: ExpressionParser,

    /// Configuration
    config: EngineConfig,
}

impl RuleEngine {
    /// Create an engine over `store` with the default configuration
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self::from_parts(EngineConfig::default(), store, None)
    }

    /// Create a builder
    pub fn builder() -> RuleEngineBuilder {
        RuleEngineBuilder::new()
    }

    pub(crate) fn from_parts(
        config: EngineConfig,
        store: Arc<dyn RuleStore>,
        catalog: Option<Arc<dyn AttributeCatalog>>,
    ) -> Self {
        Self {
            store,
            catalog,
            parser: ExpressionParser::with_max_depth(config.max_depth),
            config,
        }
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse rule text without storing anything
    pub fn parse(&self, text: &str) -> Result<Expression> {
        Ok(self.parser.parse_str(text)?)
    }

    /// Parse `text` and store it as a new rule named `name`
    ///
    /// Fails with [`SdkError::Conflict`] if the name is taken.
    pub async fn create(&self, name: &str, text: &str) -> Result<Rule> {
        validate_rule_name(name)?;
        let ast = self.parse(text)?;
        self.check_rule(name, &ast).await?;

        let rule = Rule::new(name, text, ast);
        self.store.put(&rule, None).await?;

        tracing::info!("Created rule '{}'", name);
        Ok(rule)
    }

    /// Store the `and` of the named rules as a new rule `new_name`
    pub async fn combine<S: AsRef<str>>(&self, new_name: &str, names: &[S]) -> Result<Rule> {
        self.combine_with(new_name, names, CombineOp::And).await
    }

    /// Store the combination of the named rules as a new rule `new_name`
    ///
    /// Operands keep the order of `names`. The new rule's text is the
    /// rendering of the combined tree.
    pub async fn combine_with<S: AsRef<str>>(
        &self,
        new_name: &str,
        names: &[S],
        op: CombineOp,
    ) -> Result<Rule> {
        validate_rule_name(new_name)?;

        let mut asts = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let rule = self
                .store
                .get(name)
                .await?
                .ok_or_else(|| CombineError::UnknownRule(name.to_string()))?;
            asts.push(rule.ast);
        }

        let rule = Combiner::combine_with(new_name, asts, op)?;

        // Stored text has to be readable by this engine's parser again
        self.parse(&rule.source_text)?;
        self.check_rule(new_name, &rule.ast).await?;

        self.store.put(&rule, None).await?;

        tracing::info!(
            "Combined {} rule(s) with '{}' into '{}'",
            names.len(),
            op,
            new_name
        );
        Ok(rule)
    }

    /// Evaluate the stored rule `name` against `attributes`
    pub async fn evaluate(&self, name: &str, attributes: &Attributes) -> Result<bool> {
        let rule = self.get(name).await?;
        let result = Self::evaluate_rule(&rule, attributes);

        match &result {
            Ok(value) => tracing::debug!("Rule '{}' v{} evaluated to {}", name, rule.version, value),
            Err(e) => tracing::debug!("Rule '{}' v{} failed to evaluate: {}", name, rule.version, e),
        }
        result
    }

    /// Evaluate a rule against `attributes` without touching any store
    pub fn evaluate_rule(rule: &Rule, attributes: &Attributes) -> Result<bool> {
        Ok(Evaluator::evaluate(&rule.ast, attributes)?)
    }

    /// Replace the text of rule `name`
    ///
    /// The new text is parsed in full before anything is written; on any
    /// failure the stored rule is left exactly as it was.
    pub async fn modify(&self, name: &str, new_text: &str) -> Result<Rule> {
        let existing = self.get(name).await?;
        self.replace(&existing, new_text).await
    }

    /// Replace the text of rule `name` only if it is still at `expected_version`
    ///
    /// For callers that read the rule earlier and must not overwrite a change
    /// made since.
    pub async fn modify_if_version(
        &self,
        name: &str,
        new_text: &str,
        expected_version: u64,
    ) -> Result<Rule> {
        let existing = self.get(name).await?;
        if existing.version != expected_version {
            tracing::warn!(
                "Rejected modify of rule '{}': expected version {}, found {}",
                name,
                expected_version,
                existing.version
            );
            return Err(SdkError::Conflict(ConflictError {
                name: name.to_string(),
                expected: Some(expected_version),
                actual: Some(existing.version),
            }));
        }

        self.replace(&existing, new_text).await
    }

    /// Build the next version of `rule` from `new_text`
    ///
    /// `rule` itself is never changed.
    pub fn modify_rule(&self, rule: &Rule, new_text: &str) -> Result<Rule> {
        let ast = self.parse(new_text)?;
        Ok(rule.revise(new_text, ast))
    }

    /// Load rule `name`
    pub async fn get(&self, name: &str) -> Result<Rule> {
        self.store
            .get(name)
            .await?
            .ok_or_else(|| SdkError::NotFound(name.to_string()))
    }

    /// Names of all stored rules, sorted
    pub async fn list(&self) -> Result<Vec<String>> {
        Ok(self.store.list_names().await?)
    }

    /// Declared attributes; empty without a catalog
    pub async fn attributes(&self) -> Result<Vec<AttributeDefinition>> {
        match &self.catalog {
            Some(catalog) => Ok(catalog.list_attributes().await?),
            None => Ok(Vec::new()),
        }
    }

    /// Store the next version of `existing`, expecting it to still be current
    async fn replace(&self, existing: &Rule, new_text: &str) -> Result<Rule> {
        let revised = self.modify_rule(existing, new_text)?;
        self.check_rule(&existing.name, &revised.ast).await?;

        self.store.put(&revised, Some(existing.version)).await?;

        tracing::info!(
            "Modified rule '{}' to version {}",
            existing.name,
            revised.version
        );
        Ok(revised)
    }

    /// Run static validation if it is enabled
    async fn check_rule(&self, name: &str, ast: &Expression) -> Result<()> {
        if !self.config.validate_rules {
            return Ok(());
        }
        let Some(catalog) = &self.catalog else {
            return Ok(());
        };

        let errors = RuleValidator::validate_with_catalog(ast, catalog.as_ref()).await?;
        if errors.is_empty() {
            return Ok(());
        }

        tracing::warn!(
            "Rule '{}' rejected with {} validation error(s)",
            name,
            errors.len()
        );
        Err(SdkError::Validation {
            rule: name.to_string(),
            errors,
        })
    }
}
