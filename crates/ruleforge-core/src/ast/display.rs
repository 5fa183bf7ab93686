//! Canonical rule text rendering
//!
//! `Display` for `Expression` produces text that parses back to an equal tree.
//! Combinator chains are wrapped in parentheses and left-associated chains
//! are flattened (`(a and b and c)`), so the nesting of rendered text tracks
//! the nesting of the tree rather than the length of a chain.

use super::expression::Expression;
use crate::types::Value;
use std::fmt::{self, Write};

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison {
                attribute,
                op,
                literal,
            } => write!(f, "{} {} {}", attribute, op, literal),
            Expression::And { .. } => write_chain(f, self, "and"),
            Expression::Or { .. } => write_chain(f, self, "or"),
            Expression::Not { operand } => write!(f, "not {}", operand),
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison {
                attribute,
                op,
                literal,
            } => f
                .debug_struct("Comparison")
                .field("attribute", attribute)
                .field("op", op)
                .field("literal", literal)
                .finish(),
            Expression::And { .. } => f.debug_tuple("And").field(&self.chain_operands()).finish(),
            Expression::Or { .. } => f.debug_tuple("Or").field(&self.chain_operands()).finish(),
            Expression::Not { operand } => f.debug_struct("Not").field("operand", operand).finish(),
        }
    }
}

fn write_chain(f: &mut fmt::Formatter<'_>, expr: &Expression, keyword: &str) -> fmt::Result {
    f.write_char('(')?;
    for (i, operand) in expr.chain_operands().into_iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", keyword)?;
        }
        write!(f, "{}", operand)?;
    }
    f.write_char(')')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => {
                // Floats keep a decimal point so they lex back as floats.
                let text = x.to_string();
                if x.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
            Value::String(s) => {
                f.write_char('"')?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => f.write_char(c)?,
                    }
                }
                f.write_char('"')
            }
        }
    }
}
