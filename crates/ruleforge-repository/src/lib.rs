//! Rule storage for the RuleForge rule engine
//!
//! This crate provides the store abstraction the engine persists rules
//! through, plus the attribute catalog used for static rule validation.
//!
//! # Features
//!
//! - **In-memory store**: for tests and ephemeral servers
//! - **File System store**: one YAML document per rule, atomic replace on write
//! - **Caching**: Built-in TTL-based read cache for the file system store
//! - **Optimistic concurrency**: writes carry the version they replace
//! - **Async API**: Non-blocking I/O operations with Tokio
//!
//! # Quick Start
//!
//! ```no_run
//! use ruleforge_parser::RuleParser;
//! use ruleforge_repository::{FileSystemRuleStore, RuleStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileSystemRuleStore::new("repository")?;
//!
//!     let rule = RuleParser::parse_rule("adult", "age >= 18")?;
//!     store.put(&rule, None).await?;
//!
//!     let loaded = store.get("adult").await?;
//!     assert_eq!(loaded, Some(rule));
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod file_system;
pub mod memory;
pub mod models;
pub mod traits;

// Re-exports - Configuration
pub use config::{ConfigError, RepositoryConfig, RepositorySource};

// Re-exports - Error
pub use error::{ConflictError, RepositoryError, RepositoryResult};

// Re-exports - Stores
pub use catalog::FileSystemAttributeCatalog;
pub use file_system::FileSystemRuleStore;
pub use memory::{InMemoryAttributeCatalog, InMemoryRuleStore};
pub use models::*;
pub use traits::*;
