//! Tests for REST API components

#![cfg(test)]

use super::conversions::*;
use super::types::*;
use crate::error::ServerError;
use ruleforge_sdk::{CombineOp, Expression, Rule, Value};

#[test]
fn test_json_to_attributes() {
    let json = serde_json::json!({
        "age": 20,
        "score": 3.5,
        "vip": true,
        "country": "US"
    });

    let attributes = json_to_attributes(json).unwrap();
    assert_eq!(attributes.len(), 4);
    assert_eq!(attributes.get("age"), Some(&Value::Integer(20)));
    assert_eq!(attributes.get("score"), Some(&Value::Float(3.5)));
    assert_eq!(attributes.get("vip"), Some(&Value::Bool(true)));
}

#[test]
fn test_json_to_attributes_rejects_non_scalars() {
    for json in [
        serde_json::json!({ "a": null }),
        serde_json::json!({ "a": [1, 2] }),
        serde_json::json!({ "a": { "b": 1 } }),
        serde_json::json!([1, 2]),
    ] {
        assert!(matches!(
            json_to_attributes(json),
            Err(ServerError::InvalidRequest(_))
        ));
    }
}

#[test]
fn test_combine_request_defaults_to_and() {
    let request: CombineRuleRequest =
        serde_json::from_str(r#"{"name": "c", "rules": ["a", "b"]}"#).unwrap();
    assert_eq!(request.op, CombineOp::And);

    let request: CombineRuleRequest =
        serde_json::from_str(r#"{"name": "c", "rules": ["a"], "op": "or"}"#).unwrap();
    assert_eq!(request.op, CombineOp::Or);
}

#[test]
fn test_modify_request_optional_version() {
    let request: ModifyRuleRequest = serde_json::from_str(r#"{"text": "a == 1"}"#).unwrap();
    assert_eq!(request.expected_version, None);
}

#[test]
fn test_rule_response_from_rule() {
    let ast = Expression::and(
        Expression::comparison("age", ruleforge_sdk::ComparisonOp::Ge, 18),
        Expression::comparison("vip", ruleforge_sdk::ComparisonOp::Eq, true),
    );
    let rule = Rule::new("r", "age>=18 AND vip==true", ast);

    let response = RuleResponse::from(rule);
    assert_eq!(response.text, "age>=18 AND vip==true");
    assert_eq!(response.expression, "(age >= 18 and vip == true)");
    assert_eq!(response.version, 1);
}
