//! Rule combination
//!
//! Joins rule trees into one chain, left to right in the order given. The
//! boolean result does not depend on that order when every attribute is
//! present, but which operand short-circuits or fails first does, so the
//! order is kept exactly.

use ruleforge_core::ast::{Expression, Rule};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Combinator joining the combined rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineOp {
    /// All rules must hold
    #[default]
    And,
    /// At least one rule must hold
    Or,
}

impl fmt::Display for CombineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineOp::And => f.write_str("and"),
            CombineOp::Or => f.write_str("or"),
        }
    }
}

/// Combine error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombineError {
    /// Nothing to combine
    #[error("No rules to combine")]
    EmptyInput,

    /// A referenced rule does not exist
    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

/// Rule combiner
pub struct Combiner;

impl Combiner {
    /// Combine trees with `and` into a new rule
    pub fn combine(name: &str, rule_asts: Vec<Expression>) -> Result<Rule, CombineError> {
        Self::combine_with(name, rule_asts, CombineOp::And)
    }

    /// Combine trees with `op` into a new rule
    ///
    /// The rule text is the rendering of the combined tree, so it parses back
    /// to the same tree.
    pub fn combine_with(
        name: &str,
        rule_asts: Vec<Expression>,
        op: CombineOp,
    ) -> Result<Rule, CombineError> {
        let ast = Self::combine_expressions(rule_asts, op)?;
        Ok(Rule::new(name, ast.to_string(), ast))
    }

    /// Fold trees into a left-associated chain
    pub fn combine_expressions(
        rule_asts: Vec<Expression>,
        op: CombineOp,
    ) -> Result<Expression, CombineError> {
        let mut operands = rule_asts.into_iter();
        let first = operands.next().ok_or(CombineError::EmptyInput)?;

        Ok(operands.fold(first, |acc, next| match op {
            CombineOp::And => Expression::and(acc, next),
            CombineOp::Or => Expression::or(acc, next),
        }))
    }
}
