//! Abstract Syntax Tree (AST) definitions for RuleForge
//!
//! This module contains the AST node definitions for:
//! - Expressions (comparisons and boolean combinators)
//! - Comparison operators
//! - Named, versioned rules
//!
//! The canonical text rendering lives in `display`, the serde form in
//! `serialization`.

mod display;
mod serialization;
pub mod expression;
pub mod operator;
pub mod rule;

pub use expression::Expression;
pub use operator::ComparisonOp;
pub use rule::Rule;
