//! Static rule validation
//!
//! Checks a parsed rule against declared attribute types before it is
//! stored, catching typos and mistyped literals that would otherwise only
//! surface as evaluation errors.
//!
//! # Example
//!
//! ```rust
//! use ruleforge_core::DataType;
//! use ruleforge_parser::ExpressionParser;
//! use ruleforge_sdk::{RuleValidator, ValidationError};
//! use std::collections::HashMap;
//!
//! let declared = HashMap::from([("age".to_string(), DataType::Integer)]);
//! let expr = ExpressionParser::parse(r#"age >= "18" and country == "US""#).unwrap();
//!
//! let errors = RuleValidator::validate(&expr, &declared);
//! assert_eq!(errors.len(), 2);
//! assert!(matches!(errors[1], ValidationError::UnknownAttribute { .. }));
//! ```

use ruleforge_core::ast::{ComparisonOp, Expression};
use ruleforge_core::DataType;
use ruleforge_repository::{AttributeCatalog, RepositoryResult};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// A single problem found in a rule
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// Attribute missing from the catalog
    #[error("attribute '{attribute}' is not declared")]
    UnknownAttribute { attribute: String },

    /// Literal cannot be compared with the declared attribute type
    #[error("'{attribute}' is declared {declared}; cannot apply '{operator}' to a {literal} literal")]
    TypeMismatch {
        attribute: String,
        operator: ComparisonOp,
        declared: DataType,
        literal: DataType,
    },
}

/// Rule validator
pub struct RuleValidator;

impl RuleValidator {
    /// Validate `expr` against a map of declared attribute types
    ///
    /// Problems are reported in source order. An undeclared attribute is
    /// reported once however often it is used.
    pub fn validate(expr: &Expression, declared: &HashMap<String, DataType>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut stack = vec![expr];

        while let Some(node) = stack.pop() {
            match node {
                Expression::Comparison {
                    attribute,
                    op,
                    literal,
                } => match declared.get(attribute) {
                    None => {
                        let error = ValidationError::UnknownAttribute {
                            attribute: attribute.clone(),
                        };
                        if !errors.contains(&error) {
                            errors.push(error);
                        }
                    }
                    Some(&declared_type) => {
                        let literal_type = literal.data_type();
                        if !Self::is_valid_comparison(declared_type, *op, literal_type) {
                            errors.push(ValidationError::TypeMismatch {
                                attribute: attribute.clone(),
                                operator: *op,
                                declared: declared_type,
                                literal: literal_type,
                            });
                        }
                    }
                },
                Expression::And { left, right } | Expression::Or { left, right } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
                Expression::Not { operand } => stack.push(operand.as_ref()),
            }
        }

        errors
    }

    /// Validate `expr` against an attribute catalog
    pub async fn validate_with_catalog(
        expr: &Expression,
        catalog: &dyn AttributeCatalog,
    ) -> RepositoryResult<Vec<ValidationError>> {
        let mut declared = HashMap::new();
        for name in expr.attributes() {
            if let Some(data_type) = catalog.declared_type(name).await? {
                declared.insert(name.to_string(), data_type);
            }
        }
        Ok(Self::validate(expr, &declared))
    }

    /// Same acceptance rule the evaluator applies at run time
    fn is_valid_comparison(declared: DataType, op: ComparisonOp, literal: DataType) -> bool {
        if !declared.is_comparable_with(literal) {
            return false;
        }
        !(declared == DataType::Boolean && op.is_ordering())
    }
}
