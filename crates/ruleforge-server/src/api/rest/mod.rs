//! REST API implementation
//!
//! - types: Request/response type definitions
//! - extractors: Custom request extractors
//! - conversions: JSON to attribute conversion
//! - handlers: API endpoint handlers
//! - router: Router creation and configuration
//! - tests: Unit tests for all components

mod conversions;
mod extractors;
mod handlers;
mod router;
mod tests;
pub mod types;

// Re-export public API
pub use extractors::JsonExtractor;
pub use router::create_router;
pub use types::{
    AppState, AttributeListResponse, CombineRuleRequest, CreateRuleRequest, EvaluateRequest,
    EvaluateResponse, HealthResponse, ModifyRuleRequest, RuleListResponse, RuleResponse,
};
