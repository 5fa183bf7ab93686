//! Expression evaluator
//!
//! Walks an expression tree against an attribute environment. `and`/`or`
//! short-circuit left to right: once the result is decided the remaining
//! operands are not evaluated, so errors they would raise are not reported.

use super::operators::execute_compare;
use crate::context::Attributes;
use crate::error::{EvalError, Result};
use ruleforge_core::ast::Expression;

/// Expression evaluator
pub struct Evaluator;

impl Evaluator {
    /// Evaluate `expression` against `attributes`
    pub fn evaluate(expression: &Expression, attributes: &Attributes) -> Result<bool> {
        match expression {
            Expression::Comparison {
                attribute,
                op,
                literal,
            } => {
                let actual = attributes
                    .get(attribute)
                    .ok_or_else(|| EvalError::UnknownAttribute {
                        attribute: attribute.clone(),
                    })?;
                execute_compare(attribute, actual, *op, literal)
            }

            // Left-associated chains are walked iteratively so a long
            // combined rule does not recurse once per operand.
            Expression::And { .. } => {
                for operand in expression.chain_operands() {
                    if !Self::evaluate(operand, attributes)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Expression::Or { .. } => {
                for operand in expression.chain_operands() {
                    if Self::evaluate(operand, attributes)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            Expression::Not { operand } => Ok(!Self::evaluate(operand, attributes)?),
        }
    }
}
