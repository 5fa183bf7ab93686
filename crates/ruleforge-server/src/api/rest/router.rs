//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use ruleforge_sdk::RuleEngine;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router
pub fn create_router(engine: Arc<RuleEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/health", get(health))
        .route("/v1/rules", get(list_rules).post(create_rule))
        .route("/v1/rules/combine", post(combine_rules))
        .route("/v1/rules/:name", get(get_rule).put(modify_rule))
        .route("/v1/rules/:name/evaluate", post(evaluate_rule))
        .route("/v1/attributes", get(list_attributes))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
