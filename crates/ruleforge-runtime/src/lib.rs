//! RuleForge Runtime - rule evaluation
//!
//! This crate evaluates parsed rule expressions against an attribute
//! environment supplied per call. Evaluation is a pure function of the
//! expression and the attributes; the same inputs always give the same result.

pub mod context;
pub mod engine;
pub mod error;

// Re-export main types
pub use context::Attributes;
pub use engine::Evaluator;
pub use error::{EvalError, Result};
