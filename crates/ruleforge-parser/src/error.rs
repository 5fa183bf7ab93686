//! Parser error types

use thiserror::Error;

/// Malformed token in rule text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// Character that cannot start or continue any token
    #[error("Unexpected character '{character}' at byte {position}")]
    UnexpectedCharacter { position: usize, character: char },

    /// String literal without a closing quote
    #[error("Unterminated string literal starting at byte {position}")]
    UnterminatedString { position: usize },

    /// Backslash followed by anything other than `"` or `\`
    #[error("Invalid escape sequence '\\{character}' at byte {position}")]
    InvalidEscape { position: usize, character: char },

    /// Integer literal that does not fit in 64 bits
    #[error("Integer literal '{literal}' out of range at byte {position}")]
    IntegerOverflow { position: usize, literal: String },

    /// Decimal literal whose magnitude is beyond `f64`
    #[error("Float literal '{literal}' out of range at byte {position}")]
    FloatOverflow { position: usize, literal: String },
}

impl LexError {
    /// Byte offset of the offending input
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::InvalidEscape { position, .. }
            | LexError::IntegerOverflow { position, .. }
            | LexError::FloatOverflow { position, .. } => *position,
        }
    }
}

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// Tokenization failed
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    /// Rule text is empty or whitespace only
    #[error("Empty rule expression")]
    EmptyInput,

    /// Structurally invalid expression
    #[error("Unexpected {found} at byte {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        expected: String,
        found: String,
    },

    /// Nesting of groups and `not` exceeds the configured limit
    #[error("Expression nested deeper than {limit} levels at byte {position}")]
    TooDeep { position: usize, limit: usize },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ParseError {
    /// Byte offset of the error within the rule text, when it has one
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Lex(err) => Some(err.position()),
            ParseError::EmptyInput => Some(0),
            ParseError::UnexpectedToken { position, .. } | ParseError::TooDeep { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
