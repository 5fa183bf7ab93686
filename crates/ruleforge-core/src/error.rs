//! Error types for RuleForge Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Unsupported value type: {0}")]
    UnsupportedType(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unknown data type: {0}")]
    UnknownDataType(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
