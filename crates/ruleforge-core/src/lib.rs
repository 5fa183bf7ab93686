//! RuleForge Core - Core types and definitions for the RuleForge rule engine
//!
//! This crate provides the fundamental types used across the RuleForge crates:
//! - Value types for attribute and literal data
//! - AST (Abstract Syntax Tree) definitions for rule expressions
//! - The canonical text rendering of expressions
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{ComparisonOp, Expression, Rule};
pub use error::CoreError;
pub use types::{AttributeDefinition, DataType, Value};
