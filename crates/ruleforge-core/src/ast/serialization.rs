//! Serde representation of expressions
//!
//! Left-associated chains serialize as one operand list, so
//! `And(And(a, b), c)` becomes `{"And": [a, b, c]}` and nests no deeper than
//! the grouping in the rule text.

use super::expression::Expression;
use super::operator::ComparisonOp;
use crate::types::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Serialize)]
#[serde(rename = "Expression")]
enum ExpressionRef<'a> {
    Comparison {
        attribute: &'a str,
        op: ComparisonOp,
        literal: &'a Value,
    },
    And(Vec<&'a Expression>),
    Or(Vec<&'a Expression>),
    Not {
        operand: &'a Expression,
    },
}

#[derive(Deserialize)]
#[serde(rename = "Expression")]
enum ExpressionDocument {
    Comparison {
        attribute: String,
        op: ComparisonOp,
        literal: Value,
    },
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Not {
        operand: Expression,
    },
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Expression::Comparison {
                attribute,
                op,
                literal,
            } => ExpressionRef::Comparison {
                attribute,
                op: *op,
                literal,
            },
            Expression::And { .. } => ExpressionRef::And(self.chain_operands()),
            Expression::Or { .. } => ExpressionRef::Or(self.chain_operands()),
            Expression::Not { operand } => ExpressionRef::Not { operand },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ExpressionDocument::deserialize(deserializer)? {
            ExpressionDocument::Comparison {
                attribute,
                op,
                literal,
            } => Ok(Expression::Comparison {
                attribute,
                op,
                literal,
            }),
            ExpressionDocument::And(operands) => fold_chain(operands, Expression::and),
            ExpressionDocument::Or(operands) => fold_chain(operands, Expression::or),
            ExpressionDocument::Not { operand } => Ok(Expression::not(operand)),
        }
    }
}

fn fold_chain<E: serde::de::Error>(
    operands: Vec<Expression>,
    join: fn(Expression, Expression) -> Expression,
) -> Result<Expression, E> {
    let len = operands.len();
    let mut operands = operands.into_iter();
    match operands.next() {
        Some(first) if len >= 2 => Ok(operands.fold(first, join)),
        _ => Err(E::invalid_length(len, &"at least two operands")),
    }
}
