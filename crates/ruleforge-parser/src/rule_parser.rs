//! Rule parser
//!
//! Builds [`Rule`]s from rule text, and converts rules to and from the YAML
//! document they are persisted as:
//!
//! ```yaml
//! rule:
//!   name: adult_us
//!   expression: age >= 18 and country == "US"
//!   version: 2
//!   created_at: "2024-05-01T10:00:00Z"
//!   updated_at: "2024-05-02T08:30:00Z"
//! ```
//!
//! Only the source text is stored; the tree is rebuilt by parsing it on load.

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use crate::yaml_parser::YamlParser;
use chrono::{DateTime, SecondsFormat, Utc};
use ruleforge_core::ast::Rule;
use serde::Serialize;
use serde_yaml::Value as YamlValue;

/// Rule parser
pub struct RuleParser;

#[derive(Serialize)]
struct RuleDocument<'a> {
    rule: RuleRecord<'a>,
}

#[derive(Serialize)]
struct RuleRecord<'a> {
    name: &'a str,
    expression: &'a str,
    version: u64,
    created_at: String,
    updated_at: String,
}

impl RuleParser {
    /// Parse rule text into a new rule at the initial version
    pub fn parse_rule(name: &str, text: &str) -> Result<Rule> {
        let ast = ExpressionParser::parse(text)?;
        Ok(Rule::new(name, text, ast))
    }

    /// Parse a rule from a YAML document
    pub fn parse(yaml_str: &str) -> Result<Rule> {
        Self::parse_with(&ExpressionParser::default(), yaml_str)
    }

    /// Parse a rule from a YAML document, reading the expression with `parser`
    pub fn parse_with(parser: &ExpressionParser, yaml_str: &str) -> Result<Rule> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml_with(parser, &yaml)
    }

    /// Parse a rule from YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<Rule> {
        Self::parse_from_yaml_with(&ExpressionParser::default(), yaml)
    }

    fn parse_from_yaml_with(parser: &ExpressionParser, yaml: &YamlValue) -> Result<Rule> {
        let rule_obj = YamlParser::get_field(yaml, "rule")?;

        let name = YamlParser::get_string(rule_obj, "name")?;
        let expression = YamlParser::get_string(rule_obj, "expression")?;
        let version = YamlParser::get_u64(rule_obj, "version")?;
        if version == 0 {
            return Err(ParseError::InvalidValue {
                field: "version".to_string(),
                message: "versions start at 1".to_string(),
            });
        }
        let created_at = YamlParser::get_timestamp(rule_obj, "created_at")?;
        let updated_at = YamlParser::get_timestamp(rule_obj, "updated_at")?;

        let ast = parser.parse_str(&expression)?;

        Ok(Rule {
            name,
            source_text: expression,
            ast,
            version,
            created_at,
            updated_at,
        })
    }

    /// Serialize a rule to its YAML document
    pub fn to_yaml(rule: &Rule) -> Result<String> {
        let document = RuleDocument {
            rule: RuleRecord {
                name: &rule.name,
                expression: &rule.source_text,
                version: rule.version,
                created_at: format_timestamp(&rule.created_at),
                updated_at: format_timestamp(&rule.updated_at),
            },
        };
        Ok(serde_yaml::to_string(&document)?)
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
