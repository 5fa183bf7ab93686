//! Comparison operator execution

use crate::error::{EvalError, Result};
use ruleforge_core::ast::ComparisonOp;
use ruleforge_core::Value;
use std::cmp::Ordering;

/// Compare an attribute value against a rule literal
///
/// Integer and float operands compare by exact numeric value, so integers
/// beyond 2^53 do not collapse onto a nearby float. Strings order byte-wise.
/// Booleans only support `==` and `!=`.
pub(crate) fn execute_compare(
    attribute: &str,
    actual: &Value,
    op: ComparisonOp,
    literal: &Value,
) -> Result<bool> {
    let ordering = match (actual, literal) {
        (Value::Integer(l), Value::Integer(r)) => Some(l.cmp(r)),
        (Value::Float(l), Value::Float(r)) => l.partial_cmp(r),
        (Value::Integer(l), Value::Float(r)) => compare_integer_float(*l, *r),
        (Value::Float(l), Value::Integer(r)) => compare_integer_float(*r, *l).map(Ordering::reverse),
        (Value::String(l), Value::String(r)) => Some(l.as_bytes().cmp(r.as_bytes())),
        (Value::Bool(l), Value::Bool(r)) if op.is_equality() => Some(l.cmp(r)),
        _ => return Err(mismatch(attribute, actual, op, literal)),
    };

    Ok(apply(op, ordering))
}

/// Exact ordering of an integer against a float; `None` for NaN
fn compare_integer_float(integer: i64, float: f64) -> Option<Ordering> {
    // 2^63, the first float above i64::MAX
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return None;
    }
    if float >= BOUND {
        return Some(Ordering::Less);
    }
    if float < -BOUND {
        return Some(Ordering::Greater);
    }

    // In range, so the integral part converts exactly
    let whole = float.trunc();
    match integer.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = float - whole;
            Some(if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            })
        }
        ordering => Some(ordering),
    }
}

/// Apply `op` to an ordering; unordered operands (NaN) only satisfy `!=`
fn apply(op: ComparisonOp, ordering: Option<Ordering>) -> bool {
    match ordering {
        Some(ordering) => match op {
            ComparisonOp::Eq => ordering == Ordering::Equal,
            ComparisonOp::Ne => ordering != Ordering::Equal,
            ComparisonOp::Lt => ordering == Ordering::Less,
            ComparisonOp::Le => ordering != Ordering::Greater,
            ComparisonOp::Gt => ordering == Ordering::Greater,
            ComparisonOp::Ge => ordering != Ordering::Less,
        },
        None => op == ComparisonOp::Ne,
    }
}

fn mismatch(attribute: &str, actual: &Value, op: ComparisonOp, literal: &Value) -> EvalError {
    EvalError::TypeMismatch {
        attribute: attribute.to_string(),
        operator: op,
        expected: literal.data_type(),
        found: actual.data_type(),
    }
}
