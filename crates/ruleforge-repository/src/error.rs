//! Error types for the repository layer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Write rejected because the stored version is not the one the writer expected
///
/// `expected: None` means the writer expected the rule not to exist yet;
/// `actual: None` means no rule is stored under the name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Version conflict for rule '{name}': expected {}, found {}", describe(.expected), describe(.actual))]
pub struct ConflictError {
    pub name: String,
    pub expected: Option<u64>,
    pub actual: Option<u64>,
}

fn describe(version: &Option<u64>) -> String {
    match version {
        Some(v) => format!("version {}", v),
        None => "no rule".to_string(),
    }
}

/// Errors that can occur during repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Optimistic concurrency check failed
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Parser error from ruleforge-parser
    #[error("Parser error: {0}")]
    Parser(String),

    /// Invalid path provided
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Name cannot be mapped to a storage location
    #[error("Invalid rule name: '{name}'")]
    InvalidName { name: String },

    /// Stored document is readable but inconsistent
    #[error("Invalid document {path}: {message}")]
    InvalidDocument { path: String, message: String },

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}

impl From<ruleforge_parser::ParseError> for RepositoryError {
    fn from(err: ruleforge_parser::ParseError) -> Self {
        RepositoryError::Parser(err.to_string())
    }
}

impl RepositoryError {
    /// Returns the conflict details when this is a version conflict
    pub fn as_conflict(&self) -> Option<&ConflictError> {
        match self {
            RepositoryError::Conflict(conflict) => Some(conflict),
            _ => None,
        }
    }
}
