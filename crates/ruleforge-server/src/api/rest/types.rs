//! REST API type definitions
//!
//! Request and response types for the REST API endpoints.

use chrono::{DateTime, Utc};
use ruleforge_sdk::{AttributeDefinition, CombineOp, Rule, RuleEngine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RuleEngine>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// `POST /v1/rules`
#[derive(Debug, Deserialize)]
pub struct CreateRuleRequest {
    /// Rule name
    pub name: String,

    /// Rule text
    pub text: String,
}

/// `PUT /v1/rules/:name`
#[derive(Debug, Deserialize)]
pub struct ModifyRuleRequest {
    /// New rule text
    pub text: String,

    /// Reject the change unless the rule is still at this version
    #[serde(default)]
    pub expected_version: Option<u64>,
}

/// `POST /v1/rules/combine`
#[derive(Debug, Deserialize)]
pub struct CombineRuleRequest {
    /// Name of the new rule
    pub name: String,

    /// Rules to combine, in evaluation order
    pub rules: Vec<String>,

    /// `and` (default) or `or`
    #[serde(default)]
    pub op: CombineOp,
}

/// `POST /v1/rules/:name/evaluate`
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Attribute name to value; values are booleans, numbers or strings
    pub attributes: serde_json::Value,
}

/// A stored rule
#[derive(Debug, Serialize)]
pub struct RuleResponse {
    pub name: String,
    pub text: String,
    /// Canonical rendering of the parsed rule
    pub expression: String,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rule> for RuleResponse {
    fn from(rule: Rule) -> Self {
        Self {
            expression: rule.ast.to_string(),
            name: rule.name,
            text: rule.source_text,
            version: rule.version,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}

/// `GET /v1/rules`
#[derive(Debug, Serialize)]
pub struct RuleListResponse {
    pub rules: Vec<String>,
}

/// Evaluation result
#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub rule: String,
    pub result: bool,
    /// Evaluation time in microseconds
    pub processing_time_us: u64,
}

/// `GET /v1/attributes`
#[derive(Debug, Serialize)]
pub struct AttributeListResponse {
    pub attributes: Vec<AttributeDefinition>,
}
