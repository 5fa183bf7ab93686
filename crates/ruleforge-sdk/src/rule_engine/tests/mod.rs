//! Unit tests for RuleEngine

use super::*;
use crate::combiner::{CombineError, CombineOp};
use crate::config::EngineConfig;
use crate::error::SdkError;
use ruleforge_core::ast::{ComparisonOp, Expression};
use ruleforge_parser::ParseError;
use ruleforge_repository::{InMemoryRuleStore, RuleStore};
use ruleforge_runtime::{Attributes, EvalError};
use std::sync::Arc;

fn engine() -> RuleEngine {
    RuleEngine::new(Arc::new(InMemoryRuleStore::new()))
}

#[tokio::test]
async fn test_create_and_get() {
    let engine = engine();
    let rule = engine.create("adult", "age >= 18").await.unwrap();

    assert_eq!(rule.version, 1);
    assert_eq!(rule.ast, Expression::comparison("age", ComparisonOp::Ge, 18));
    assert_eq!(engine.get("adult").await.unwrap(), rule);
}

#[tokio::test]
async fn test_create_duplicate_is_conflict() {
    let engine = engine();
    engine.create("adult", "age >= 18").await.unwrap();

    let err = engine.create("adult", "age >= 21").await.unwrap_err();
    assert!(matches!(err, SdkError::Conflict(_)));
    assert_eq!(engine.get("adult").await.unwrap().source_text, "age >= 18");
}

#[tokio::test]
async fn test_create_parse_error_stores_nothing() {
    let engine = engine();
    let err = engine.create("broken", "age >=").await.unwrap_err();

    assert!(matches!(err, SdkError::Parse(ParseError::UnexpectedToken { .. })));
    assert!(engine.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_invalid_name() {
    let err = engine().create("../etc", "a == 1").await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidRuleName { .. }));
}

#[tokio::test]
async fn test_get_missing() {
    let err = engine().get("nothing").await.unwrap_err();
    assert!(matches!(err, SdkError::NotFound(ref name) if name == "nothing"));
}

#[tokio::test]
async fn test_evaluate_missing_rule() {
    let err = engine()
        .evaluate("nothing", &Attributes::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::NotFound(_)));
}

#[tokio::test]
async fn test_evaluate_reports_errors() {
    let engine = engine();
    engine.create("adult", "age >= 18").await.unwrap();

    let err = engine
        .evaluate("adult", &Attributes::new().with("country", "US"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SdkError::Eval(EvalError::UnknownAttribute { ref attribute }) if attribute == "age"
    ));
}

#[tokio::test]
async fn test_combine_unknown_rule() {
    let engine = engine();
    engine.create("r_age", "age >= 18").await.unwrap();

    let err = engine
        .combine("both", &["r_age", "r_missing"])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SdkError::Combine(CombineError::UnknownRule(ref name)) if name == "r_missing"
    ));
    assert_eq!(engine.list().await.unwrap(), vec!["r_age"]);
}

#[tokio::test]
async fn test_combine_empty() {
    let names: [&str; 0] = [];
    let err = engine().combine("none", &names).await.unwrap_err();
    assert!(matches!(err, SdkError::Combine(CombineError::EmptyInput)));
}

#[tokio::test]
async fn test_combine_with_or() {
    let engine = engine();
    engine.create("minor", "age < 18").await.unwrap();
    engine.create("senior", "age >= 65").await.unwrap();

    let rule = engine
        .combine_with("discount", &["minor", "senior"], CombineOp::Or)
        .await
        .unwrap();
    assert_eq!(rule.source_text, "(age < 18 or age >= 65)");

    for (age, expected) in [(10, true), (40, false), (70, true)] {
        let attributes = Attributes::new().with("age", age);
        assert_eq!(engine.evaluate("discount", &attributes).await.unwrap(), expected);
    }
}

#[tokio::test]
async fn test_combined_rule_deeper_than_limit() {
    let engine = RuleEngine::from_parts(
        EngineConfig::new().with_max_depth(1),
        Arc::new(InMemoryRuleStore::new()),
        None,
    );
    engine.create("a", "(x == 1)").await.unwrap();
    engine.create("b", "not y == 2").await.unwrap();

    // Each operand fits; the combined text nests one level deeper
    let err = engine.combine("ab", &["a", "b"]).await.unwrap_err();
    assert!(matches!(err, SdkError::Parse(ParseError::TooDeep { .. })));
    assert!(matches!(engine.get("ab").await, Err(SdkError::NotFound(_))));
}

#[tokio::test]
async fn test_modify_bumps_version() {
    let engine = engine();
    engine.create("adult", "age >= 18").await.unwrap();

    let revised = engine.modify("adult", "age >= 21").await.unwrap();
    assert_eq!(revised.version, 2);
    assert_eq!(revised.source_text, "age >= 21");

    let attributes = Attributes::new().with("age", 19);
    assert!(!engine.evaluate("adult", &attributes).await.unwrap());
}

#[tokio::test]
async fn test_modify_is_atomic() {
    let engine = engine();
    let original = engine.create("adult", "age >= 18").await.unwrap();

    let err = engine.modify("adult", "bad text (").await.unwrap_err();
    assert!(matches!(err, SdkError::Parse(_)));
    assert_eq!(engine.get("adult").await.unwrap(), original);
}

#[tokio::test]
async fn test_modify_rule_leaves_input_untouched() {
    let engine = engine();
    let rule = engine.create("adult", "age >= 18").await.unwrap();

    let revised = engine.modify_rule(&rule, "age > 17").unwrap();
    assert_eq!(revised.version, 2);
    assert_eq!(rule.version, 1);
    assert!(engine.modify_rule(&rule, "").is_err());
}

#[tokio::test]
async fn test_modify_after_concurrent_write_is_conflict() {
    let store = Arc::new(InMemoryRuleStore::new());
    let engine = RuleEngine::new(store.clone());
    let original = engine.create("adult", "age >= 18").await.unwrap();

    // Another writer replaces the rule behind the engine's back
    let theirs = original.revise("age >= 30", engine.parse("age >= 30").unwrap());
    store.put(&theirs, Some(1)).await.unwrap();

    // A stale revision built from version 1 is rejected
    let ours = engine.modify_rule(&original, "age >= 21").unwrap();
    let err: SdkError = store.put(&ours, Some(1)).await.unwrap_err().into();
    assert!(matches!(err, SdkError::Conflict(ref c) if c.actual == Some(2)));

    // The engine itself reloads, so its modify succeeds on top of theirs
    let revised = engine.modify("adult", "age >= 21").await.unwrap();
    assert_eq!(revised.version, 3);
}

#[tokio::test]
async fn test_evaluate_rule_is_pure() {
    let engine = engine();
    let rule = engine.create("adult", "age >= 18").await.unwrap();
    let attributes = Attributes::new().with("age", 20);

    assert!(RuleEngine::evaluate_rule(&rule, &attributes).unwrap());
    assert!(RuleEngine::evaluate_rule(&rule, &attributes).unwrap());
}

#[tokio::test]
async fn test_attributes_without_catalog() {
    assert!(engine().attributes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_modify_if_version() {
    let engine = engine();
    engine.create("adult", "age >= 18").await.unwrap();

    let revised = engine.modify_if_version("adult", "age >= 21", 1).await.unwrap();
    assert_eq!(revised.version, 2);

    let err = engine
        .modify_if_version("adult", "age >= 30", 1)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SdkError::Conflict(ref c) if c.expected == Some(1) && c.actual == Some(2)
    ));
    assert_eq!(engine.get("adult").await.unwrap().source_text, "age >= 21");
}
