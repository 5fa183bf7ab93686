//! RuleForge SDK
//!
//! High-level API for creating, combining, modifying and evaluating named
//! rules kept in a rule store.
//!
//! # Example
//!
//! ```rust
//! use ruleforge_sdk::{Attributes, RuleEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> ruleforge_sdk::Result<()> {
//! let engine = RuleEngine::builder().build().await?;
//!
//! engine.create("r_age", "age >= 18").await?;
//! engine.create("r_country", r#"country == "US""#).await?;
//! engine.combine("adult_us", &["r_age", "r_country"]).await?;
//!
//! let attributes = Attributes::new().with("age", 20).with("country", "US");
//! assert!(engine.evaluate("adult_us", &attributes).await?);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod combiner;
pub mod config;
pub mod error;
pub mod rule_engine;
pub mod validator;

// Re-export main types
pub use builder::RuleEngineBuilder;
pub use combiner::{CombineError, CombineOp, Combiner};
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use rule_engine::{RuleEngine, MAX_RULE_NAME_LEN};
pub use validator::{RuleValidator, ValidationError};

// Re-export commonly used types from dependencies
pub use ruleforge_core::{AttributeDefinition, ComparisonOp, DataType, Expression, Rule, Value};
pub use ruleforge_repository::{
    AttributeCatalog, ConflictError, InMemoryAttributeCatalog, InMemoryRuleStore,
    RepositoryConfig, RepositorySource, RuleStore,
};
pub use ruleforge_runtime::{Attributes, EvalError};
