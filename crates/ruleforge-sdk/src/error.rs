//! SDK error types

use crate::combiner::CombineError;
use crate::validator::ValidationError;
use ruleforge_parser::ParseError;
use ruleforge_repository::{ConflictError, RepositoryError};
use ruleforge_runtime::EvalError;
use thiserror::Error;

/// SDK error type
///
/// Every engine call returns one of these instead of logging and carrying on,
/// so "evaluated to false" and "failed to evaluate" stay distinguishable.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Rule text did not parse
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Rule could not be evaluated against the supplied attributes
    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    /// Combination request could not be satisfied
    #[error("Combine error: {0}")]
    Combine(#[from] CombineError),

    /// No rule with this name
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// Concurrent modification detected by the store
    #[error(transparent)]
    Conflict(ConflictError),

    /// Rule refers to undeclared attributes or mistyped literals
    #[error("Rule '{rule}' failed validation: {}", join_errors(.errors))]
    Validation {
        rule: String,
        errors: Vec<ValidationError>,
    },

    /// Name unusable as a rule identifier
    #[error("Invalid rule name '{name}': {reason}")]
    InvalidRuleName { name: String, reason: String },

    /// Storage failure
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<RepositoryError> for SdkError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(conflict) => SdkError::Conflict(conflict),
            other => SdkError::Repository(other),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
