//! API endpoint handlers
//!
//! HTTP request handlers for all REST API endpoints.

use super::conversions::json_to_attributes;
use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::time::Instant;
use tracing::info;

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List rule names
pub(super) async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<RuleListResponse>, ServerError> {
    let rules = state.engine.list().await?;
    Ok(Json(RuleListResponse { rules }))
}

/// Create a rule
pub(super) async fn create_rule(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<CreateRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), ServerError> {
    info!("Received create request for rule '{}'", payload.name);

    let rule = state.engine.create(&payload.name, &payload.text).await?;
    Ok((StatusCode::CREATED, Json(rule.into())))
}

/// Get a rule
pub(super) async fn get_rule(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RuleResponse>, ServerError> {
    let rule = state.engine.get(&name).await?;
    Ok(Json(rule.into()))
}

/// Replace a rule's text
pub(super) async fn modify_rule(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonExtractor(payload): JsonExtractor<ModifyRuleRequest>,
) -> Result<Json<RuleResponse>, ServerError> {
    info!("Received modify request for rule '{}'", name);

    let rule = match payload.expected_version {
        Some(version) => {
            state
                .engine
                .modify_if_version(&name, &payload.text, version)
                .await?
        }
        None => state.engine.modify(&name, &payload.text).await?,
    };
    Ok(Json(rule.into()))
}

/// Combine rules into a new rule
pub(super) async fn combine_rules(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<CombineRuleRequest>,
) -> Result<(StatusCode, Json<RuleResponse>), ServerError> {
    info!(
        "Received combine request for rule '{}' from {} rule(s)",
        payload.name,
        payload.rules.len()
    );

    let rule = state
        .engine
        .combine_with(&payload.name, &payload.rules, payload.op)
        .await?;
    Ok((StatusCode::CREATED, Json(rule.into())))
}

/// Evaluate a rule
pub(super) async fn evaluate_rule(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonExtractor(payload): JsonExtractor<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ServerError> {
    let start = Instant::now();
    let attributes = json_to_attributes(payload.attributes)?;

    let result = state.engine.evaluate(&name, &attributes).await?;

    Ok(Json(EvaluateResponse {
        rule: name,
        result,
        processing_time_us: start.elapsed().as_micros() as u64,
    }))
}

/// List declared attributes
pub(super) async fn list_attributes(
    State(state): State<AppState>,
) -> Result<Json<AttributeListResponse>, ServerError> {
    let attributes = state.engine.attributes().await?;
    Ok(Json(AttributeListResponse { attributes }))
}
