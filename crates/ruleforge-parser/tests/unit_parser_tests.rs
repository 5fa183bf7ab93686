//! Unit tests for the rule text parser
//!
//! Covers parsing of full rules, rendering round-trips and error positions.

use ruleforge_core::ast::{ComparisonOp, Expression};
use ruleforge_core::Value;
use ruleforge_parser::*;

fn cmp(attribute: &str, op: ComparisonOp, literal: impl Into<Value>) -> Expression {
    Expression::comparison(attribute, op, literal)
}

// =============================================================================
// Expression Parser Tests
// =============================================================================

#[test]
fn test_parse_age_and_country() {
    let expr = ExpressionParser::parse(r#"age >= 18 and country == "US""#).unwrap();
    assert_eq!(
        expr,
        Expression::and(
            cmp("age", ComparisonOp::Ge, 18),
            cmp("country", ComparisonOp::Eq, "US"),
        )
    );
}

#[test]
fn test_parse_mixed_precedence() {
    let expr =
        ExpressionParser::parse("not (a == 1 or b == 2) and c > 1.5 or d != false").unwrap();
    assert_eq!(
        expr,
        Expression::or(
            Expression::and(
                Expression::not(Expression::or(
                    cmp("a", ComparisonOp::Eq, 1),
                    cmp("b", ComparisonOp::Eq, 2),
                )),
                cmp("c", ComparisonOp::Gt, 1.5),
            ),
            cmp("d", ComparisonOp::Ne, false),
        )
    );
}

#[test]
fn test_parse_uppercase_keywords() {
    let lower = ExpressionParser::parse("a == 1 and not b == true").unwrap();
    let upper = ExpressionParser::parse("a == 1 AND NOT b == TRUE").unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn test_attribute_names_are_case_sensitive() {
    let expr = ExpressionParser::parse("Age >= 18").unwrap();
    assert_eq!(expr.attributes(), vec!["Age"]);
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_render_reparses_to_same_tree() {
    let texts = [
        "age >= 18",
        r#"age >= 18 and country == "US""#,
        "a == 1 or b == 2 and c == 3",
        "(a == 1 or b == 2) and c == 3",
        "a == 1 and (b == 2 and c == 3)",
        "not not flag == true",
        "not (x < -5 or y >= 2.0)",
        r#"name == "quote \" and \\ backslash""#,
        "a == 1 or b == 2 or c == 3 or d == 4",
        "score <= 0.001 and count != -42",
    ];

    for text in texts {
        let parsed = ExpressionParser::parse(text).unwrap();
        let rendered = parsed.to_string();
        let reparsed = ExpressionParser::parse(&rendered)
            .unwrap_or_else(|e| panic!("'{}' rendered as '{}' failed: {}", text, rendered, e));
        assert_eq!(parsed, reparsed, "round-trip changed tree for '{}'", text);
    }
}

#[test]
fn test_render_of_long_chain_stays_shallow() {
    let mut expr = cmp("x0", ComparisonOp::Eq, 0);
    for i in 1..500 {
        expr = Expression::and(expr, cmp(&format!("x{}", i), ComparisonOp::Eq, i));
    }

    let rendered = expr.to_string();
    let reparsed = ExpressionParser::parse(&rendered).unwrap();
    assert_eq!(reparsed, expr);
}

#[test]
fn test_float_literal_stays_float_after_render() {
    let expr = cmp("ratio", ComparisonOp::Lt, 2.0);
    let reparsed = ExpressionParser::parse(&expr.to_string()).unwrap();
    assert_eq!(reparsed, expr);
}

fn assert_literal_round_trips(literal: Value) {
    let expr = cmp("v", ComparisonOp::Eq, literal.clone());
    let rendered = expr.to_string();
    let reparsed = ExpressionParser::parse(&rendered)
        .unwrap_or_else(|e| panic!("{:?} rendered as '{}' failed: {}", literal, rendered, e));

    match (&reparsed, &literal) {
        (
            Expression::Comparison {
                literal: Value::Float(back),
                ..
            },
            Value::Float(x),
        ) => assert_eq!(back.to_bits(), x.to_bits(), "float {:?} came back as {:?}", x, back),
        _ => assert_eq!(reparsed, expr, "round-trip changed {:?}", literal),
    }
}

#[test]
fn test_float_literal_edges_round_trip() {
    let floats = [
        0.0,
        -0.0,
        0.1 + 0.2,
        -2.5,
        123456789.125,
        f64::EPSILON,
        f64::MIN_POSITIVE,
        5e-324,
        1e-300,
        1e22,
        1e300,
        f64::MAX,
        f64::MIN,
    ];
    for x in floats {
        assert_literal_round_trips(Value::Float(x));
    }

    // Sweep magnitudes across the whole exponent range
    let mut x = 1.5e-300;
    while x < 1e300 {
        assert_literal_round_trips(Value::Float(x));
        assert_literal_round_trips(Value::Float(-x));
        x *= 7.3e11;
    }
}

#[test]
fn test_integer_and_bool_literal_edges_round_trip() {
    for n in [0, 1, -1, i64::MAX, i64::MIN, i64::MIN + 1] {
        assert_literal_round_trips(Value::Integer(n));
    }
    assert_literal_round_trips(Value::Bool(true));
    assert_literal_round_trips(Value::Bool(false));
}

#[test]
fn test_string_literal_edges_round_trip() {
    let strings = [
        "",
        "\\",
        "\"",
        "\\\"",
        "\"\\\"\\",
        "ends with backslash \\",
        "a == 1 and b == 2",
        "(not)",
        "tab\there",
        "line\nbreak",
        "größe ✓",
    ];
    for s in strings {
        assert_literal_round_trips(Value::String(s.to_string()));
    }
}

#[test]
fn test_out_of_range_float_rejected() {
    let text = format!("x > {}.0", "1".repeat(400));
    let err = ExpressionParser::parse(&text).unwrap_err();
    assert!(matches!(err, ParseError::Lex(LexError::FloatOverflow { position: 4, .. })));
}

#[test]
fn test_long_flat_chain_of_request_size() {
    let text = vec!["a == 1"; 200_000].join(" and ");
    let expr = ExpressionParser::parse(&text).unwrap();
    assert_eq!(expr.chain_operands().len(), 200_000);

    let cloned = expr.clone();
    assert!(cloned == expr);

    let reparsed = ExpressionParser::parse(&expr.to_string()).unwrap();
    assert!(reparsed == expr);

    drop(cloned);
    drop(reparsed);
    drop(expr);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_error_positions_point_into_text() {
    let cases = [
        ("", 0),
        ("age >=", 6),
        ("age >= 18 and", 13),
        ("(age >= 18", 10),
        ("age >= 18 country == 1", 10),
        ("age >= \"US", 7),
        ("age => 18", 4),
    ];

    for (text, expected) in cases {
        let err = ExpressionParser::parse(text).unwrap_err();
        assert_eq!(err.position(), Some(expected), "wrong position for '{}': {}", text, err);
    }
}

#[test]
fn test_trailing_tokens_rejected() {
    let err = ExpressionParser::parse("age >= 18 country == 1").unwrap_err();
    match err {
        ParseError::UnexpectedToken {
            expected, found, ..
        } => {
            assert_eq!(expected, "'and', 'or' or end of input");
            assert_eq!(found, "identifier 'country'");
        }
        other => panic!("Expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_too_deep_input() {
    let text = format!("{}a == 1", "not ".repeat(300));
    assert!(matches!(
        ExpressionParser::parse(&text),
        Err(ParseError::TooDeep { limit: 256, .. })
    ));

    let lenient = ExpressionParser::with_max_depth(512);
    assert!(lenient.parse_str(&text).is_ok());
}

// =============================================================================
// Rule Document Tests
// =============================================================================

#[test]
fn test_rule_document_round_trip() {
    let rule = RuleParser::parse_rule("adult_us", r#"age >= 18 and country == "US""#).unwrap();
    let yaml = RuleParser::to_yaml(&rule).unwrap();

    assert!(yaml.contains("name: adult_us"));
    assert_eq!(RuleParser::parse(&yaml).unwrap(), rule);
}

#[test]
fn test_rule_document_with_bad_expression() {
    let yaml = r#"
rule:
  name: broken
  expression: "age >= (18"
  version: 1
  created_at: "2024-05-01T10:00:00Z"
  updated_at: "2024-05-01T10:00:00Z"
"#;
    assert!(matches!(
        RuleParser::parse(yaml),
        Err(ParseError::Lex(_)) | Err(ParseError::UnexpectedToken { .. })
    ));
}
