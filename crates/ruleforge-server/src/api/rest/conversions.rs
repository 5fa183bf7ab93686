//! Request body conversions

use crate::error::ServerError;
use ruleforge_sdk::Attributes;

/// Convert a JSON object into evaluation attributes
///
/// Nulls, arrays and nested objects are rejected rather than dropped.
pub(super) fn json_to_attributes(value: serde_json::Value) -> Result<Attributes, ServerError> {
    Attributes::from_json(value).map_err(|e| ServerError::InvalidRequest(e.to_string()))
}
