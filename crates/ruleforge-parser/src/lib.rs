//! RuleForge Parser - rule text to AST
//!
//! This crate turns rule text such as `age >= 18 and country == "US"` into
//! RuleForge AST structures, and reads/writes the YAML documents rules are
//! persisted as.

pub mod error;
pub mod expression_parser;
pub mod lexer;
pub mod rule_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use error::{LexError, ParseError, Result};
pub use expression_parser::ExpressionParser;
pub use lexer::{Lexer, Token, TokenKind};
pub use rule_parser::RuleParser;
pub use yaml_parser::YamlParser;
