//! Evaluation error types

use ruleforge_core::ast::ComparisonOp;
use ruleforge_core::types::DataType;
use thiserror::Error;

/// Evaluation error
///
/// Evaluation either yields a definite boolean or one of these; a failure is
/// never reported as `false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Attribute referenced by the rule is absent from the environment
    #[error("Unknown attribute: {attribute}")]
    UnknownAttribute { attribute: String },

    /// Attribute value cannot be compared with the literal
    #[error("Type mismatch for '{attribute}': cannot apply '{operator}' to {found} value and {expected} literal")]
    TypeMismatch {
        attribute: String,
        operator: ComparisonOp,
        expected: DataType,
        found: DataType,
    },
}

impl EvalError {
    /// Name of the attribute the error concerns
    pub fn attribute(&self) -> &str {
        match self {
            EvalError::UnknownAttribute { attribute } | EvalError::TypeMismatch { attribute, .. } => {
                attribute
            }
        }
    }
}

/// Result type for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;
