//! Expression AST nodes

use super::operator::ComparisonOp;
use crate::types::Value;
use std::mem;

/// Expression AST node
///
/// Every node owns its children exclusively. Trees are never mutated after
/// construction; changing a rule builds a new tree.
///
/// A flat `a and b and ...` chain is one tree level per operand, and chain
/// length is not bounded by the parser's nesting limit. `Clone`, `PartialEq`
/// and `Drop` therefore walk the tree with an explicit stack, and `Debug` and
/// serde treat a left-associated chain as a single list of operands.
pub enum Expression {
    /// Attribute compared against a literal (e.g., `age >= 18`)
    Comparison {
        attribute: String,
        op: ComparisonOp,
        literal: Value,
    },

    /// Logical AND
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Logical OR
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Logical NOT
    Not { operand: Box<Expression> },
}

impl Expression {
    /// Create a comparison expression
    pub fn comparison(
        attribute: impl Into<String>,
        op: ComparisonOp,
        literal: impl Into<Value>,
    ) -> Self {
        Expression::Comparison {
            attribute: attribute.into(),
            op,
            literal: literal.into(),
        }
    }

    /// Create an AND expression
    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create an OR expression
    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a NOT expression
    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Expression) -> Self {
        Expression::Not {
            operand: Box::new(operand),
        }
    }

    /// Returns true for `Comparison` nodes
    pub fn is_comparison(&self) -> bool {
        matches!(self, Expression::Comparison { .. })
    }

    /// Operands of a left-associated chain of the same combinator, in
    /// evaluation order.
    ///
    /// `And(And(a, b), c)` yields `[a, b, c]`; `And(a, And(b, c))` yields
    /// `[a, And(b, c)]`. Any other node yields itself.
    pub fn chain_operands(&self) -> Vec<&Expression> {
        let mut reversed = Vec::new();
        let mut current = self;
        loop {
            match (self, current) {
                (Expression::And { .. }, Expression::And { left, right })
                | (Expression::Or { .. }, Expression::Or { left, right }) => {
                    reversed.push(right.as_ref());
                    current = left.as_ref();
                }
                _ => {
                    reversed.push(current);
                    break;
                }
            }
        }
        reversed.reverse();
        reversed
    }

    /// Maximum nesting depth of the tree (a single comparison has depth 1)
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            match node {
                Expression::Comparison { .. } => {}
                Expression::And { left, right } | Expression::Or { left, right } => {
                    stack.push((right.as_ref(), depth + 1));
                    stack.push((left.as_ref(), depth + 1));
                }
                Expression::Not { operand } => stack.push((operand.as_ref(), depth + 1)),
            }
        }
        max_depth
    }

    /// Attribute names referenced by the tree, in first-use order, without
    /// duplicates
    pub fn attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Expression::Comparison { attribute, .. } => {
                    if !names.contains(&attribute.as_str()) {
                        names.push(attribute.as_str());
                    }
                }
                Expression::And { left, right } | Expression::Or { left, right } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
                Expression::Not { operand } => stack.push(operand.as_ref()),
            }
        }
        names
    }
}

impl Expression {
    /// Childless stand-in used while taking a tree apart
    fn leaf() -> Self {
        Expression::Comparison {
            attribute: String::new(),
            op: ComparisonOp::Eq,
            literal: Value::Bool(false),
        }
    }

    /// Move the non-leaf children of `self` onto `out`, leaving leaves behind
    fn detach_children(&mut self, out: &mut Vec<Expression>) {
        match self {
            Expression::Comparison { .. } => {}
            Expression::And { left, right } | Expression::Or { left, right } => {
                for child in [left, right] {
                    if !child.is_comparison() {
                        out.push(mem::replace(child.as_mut(), Expression::leaf()));
                    }
                }
            }
            Expression::Not { operand } => {
                if !operand.is_comparison() {
                    out.push(mem::replace(operand.as_mut(), Expression::leaf()));
                }
            }
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        if self.is_comparison() {
            return;
        }
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(mut node) = detached.pop() {
            node.detach_children(&mut detached);
        }
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        enum Step<'a> {
            Visit(&'a Expression),
            BuildAnd,
            BuildOr,
            BuildNot,
        }

        let mut steps = vec![Step::Visit(self)];
        let mut built: Vec<Expression> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Expression::Comparison {
                    attribute,
                    op,
                    literal,
                }) => built.push(Expression::Comparison {
                    attribute: attribute.clone(),
                    op: *op,
                    literal: literal.clone(),
                }),
                Step::Visit(Expression::And { left, right }) => {
                    steps.push(Step::BuildAnd);
                    steps.push(Step::Visit(right.as_ref()));
                    steps.push(Step::Visit(left.as_ref()));
                }
                Step::Visit(Expression::Or { left, right }) => {
                    steps.push(Step::BuildOr);
                    steps.push(Step::Visit(right.as_ref()));
                    steps.push(Step::Visit(left.as_ref()));
                }
                Step::Visit(Expression::Not { operand }) => {
                    steps.push(Step::BuildNot);
                    steps.push(Step::Visit(operand.as_ref()));
                }
                Step::BuildAnd | Step::BuildOr => {
                    // Children were built left first, so right is on top
                    if let (Some(right), Some(left)) = (built.pop(), built.pop()) {
                        built.push(match step {
                            Step::BuildAnd => Expression::and(left, right),
                            _ => Expression::or(left, right),
                        });
                    }
                }
                Step::BuildNot => {
                    if let Some(operand) = built.pop() {
                        built.push(Expression::not(operand));
                    }
                }
            }
        }
        built.pop().unwrap_or_else(Expression::leaf)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (
                    Expression::Comparison {
                        attribute: a1,
                        op: o1,
                        literal: l1,
                    },
                    Expression::Comparison {
                        attribute: a2,
                        op: o2,
                        literal: l2,
                    },
                ) => {
                    if a1 != a2 || o1 != o2 || l1 != l2 {
                        return false;
                    }
                }
                (
                    Expression::And {
                        left: left1,
                        right: right1,
                    },
                    Expression::And {
                        left: left2,
                        right: right2,
                    },
                )
                | (
                    Expression::Or {
                        left: left1,
                        right: right1,
                    },
                    Expression::Or {
                        left: left2,
                        right: right2,
                    },
                ) => {
                    pending.push((right1.as_ref(), right2.as_ref()));
                    pending.push((left1.as_ref(), left2.as_ref()));
                }
                (Expression::Not { operand: a }, Expression::Not { operand: b }) => {
                    pending.push((a.as_ref(), b.as_ref()));
                }
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_check() -> Expression {
        Expression::comparison("age", ComparisonOp::Ge, 18)
    }

    fn country_check() -> Expression {
        Expression::comparison("country", ComparisonOp::Eq, "US")
    }

    #[test]
    fn test_comparison_expression() {
        let expr = age_check();
        assert_eq!(
            expr,
            Expression::Comparison {
                attribute: "age".to_string(),
                op: ComparisonOp::Ge,
                literal: Value::Integer(18),
            }
        );
        assert!(expr.is_comparison());
    }

    #[test]
    fn test_and_expression() {
        let expr = Expression::and(age_check(), country_check());

        match &expr {
            Expression::And { left, right } => {
                assert_eq!(**left, age_check());
                assert_eq!(**right, country_check());
            }
            _ => panic!("Expected And expression"),
        }
    }

    #[test]
    fn test_chain_operands_left_associated() {
        let c = Expression::comparison("income", ComparisonOp::Gt, 50000);
        let expr = Expression::and(Expression::and(age_check(), country_check()), c.clone());

        let operands = expr.chain_operands();
        assert_eq!(operands, vec![&age_check(), &country_check(), &c]);
    }

    #[test]
    fn test_chain_operands_stops_at_other_combinator() {
        let nested = Expression::or(age_check(), country_check());
        let expr = Expression::and(nested.clone(), age_check());
        assert_eq!(expr.chain_operands(), vec![&nested, &age_check()]);

        let right_nested = Expression::and(age_check(), Expression::and(age_check(), country_check()));
        assert_eq!(right_nested.chain_operands().len(), 2);

        assert_eq!(age_check().chain_operands(), vec![&age_check()]);
    }

    #[test]
    fn test_depth() {
        assert_eq!(age_check().depth(), 1);
        assert_eq!(Expression::not(age_check()).depth(), 2);

        let expr = Expression::or(
            Expression::and(age_check(), Expression::not(country_check())),
            age_check(),
        );
        assert_eq!(expr.depth(), 4);
    }

    #[test]
    fn test_attributes_deduplicated_in_order() {
        let expr = Expression::or(
            Expression::and(country_check(), age_check()),
            Expression::not(Expression::comparison("age", ComparisonOp::Lt, 65)),
        );
        assert_eq!(expr.attributes(), vec!["country", "age"]);
    }

    #[test]
    fn test_expression_clone_is_independent() {
        let expr = Expression::and(age_check(), country_check());
        let cloned = expr.clone();
        assert_eq!(expr, cloned);
        assert_ne!(expr, Expression::or(age_check(), country_check()));
        assert_ne!(expr, Expression::and(age_check(), age_check()));
    }

    fn long_chain(len: i64) -> Expression {
        let mut expr = Expression::comparison("x", ComparisonOp::Eq, 0);
        for i in 1..len {
            expr = Expression::and(expr, Expression::comparison("x", ComparisonOp::Eq, i));
        }
        expr
    }

    #[test]
    fn test_long_chain_clone_compare_and_drop() {
        let expr = long_chain(200_000);
        let cloned = expr.clone();
        assert!(expr == cloned);

        let other = Expression::and(long_chain(199_999), age_check());
        assert!(expr != other);

        drop(cloned);
        drop(other);
        drop(expr);
    }

    #[test]
    fn test_deep_not_and_right_nested_drop() {
        let mut expr = age_check();
        for _ in 0..100_000 {
            expr = Expression::not(expr);
        }
        for _ in 0..100_000 {
            expr = Expression::or(country_check(), expr);
        }
        let cloned = expr.clone();
        assert!(cloned == expr);
    }

    #[test]
    fn test_clone_keeps_operand_order() {
        let expr = Expression::or(
            Expression::not(Expression::and(age_check(), country_check())),
            Expression::comparison("vip", ComparisonOp::Eq, true),
        );
        let cloned = expr.clone();
        assert_eq!(cloned.to_string(), expr.to_string());
        assert_eq!(cloned.attributes(), vec!["age", "country", "vip"]);
    }
}
