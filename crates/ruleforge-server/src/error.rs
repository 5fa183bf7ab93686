//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ruleforge_sdk::{CombineError, SdkError};
use serde_json::json;
use std::fmt;

/// Server error type
#[derive(Debug)]
pub enum ServerError {
    /// Malformed request or rule text
    InvalidRequest(String),

    /// Rule is well formed but cannot be accepted or evaluated
    Unprocessable(String),

    /// Not found
    NotFound(String),

    /// Write based on a stale version
    Conflict(String),

    /// Internal server error
    InternalError(String),
}

impl ServerError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
            ServerError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServerError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ServerError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::InvalidRequest(msg)
            | ServerError::Unprocessable(msg)
            | ServerError::NotFound(msg)
            | ServerError::Conflict(msg)
            | ServerError::InternalError(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<SdkError> for ServerError {
    fn from(err: SdkError) -> Self {
        let message = err.to_string();
        match err {
            SdkError::Parse(_)
            | SdkError::InvalidRuleName { .. }
            | SdkError::Combine(CombineError::EmptyInput) => ServerError::InvalidRequest(message),
            SdkError::Eval(_) | SdkError::Validation { .. } => ServerError::Unprocessable(message),
            SdkError::NotFound(_) | SdkError::Combine(CombineError::UnknownRule(_)) => {
                ServerError::NotFound(message)
            }
            SdkError::Conflict(_) => ServerError::Conflict(message),
            SdkError::Repository(_) | SdkError::Config(_) => {
                tracing::error!("Engine failure: {}", message);
                ServerError::InternalError(message)
            }
        }
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleforge_sdk::{ConflictError, EvalError};

    #[test]
    fn test_invalid_request_display() {
        let err = ServerError::InvalidRequest("missing field".to_string());
        assert_eq!(err.to_string(), "Invalid request: missing field");
    }

    #[test]
    fn test_not_found_display() {
        let err = ServerError::NotFound("rule not found".to_string());
        assert_eq!(err.to_string(), "Not found: rule not found");
    }

    #[test]
    fn test_sdk_error_statuses() {
        let cases = [
            (SdkError::NotFound("r".to_string()), StatusCode::NOT_FOUND),
            (
                SdkError::Combine(CombineError::UnknownRule("r".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                SdkError::Combine(CombineError::EmptyInput),
                StatusCode::BAD_REQUEST,
            ),
            (
                SdkError::Eval(EvalError::UnknownAttribute {
                    attribute: "age".to_string(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                SdkError::Conflict(ConflictError {
                    name: "r".to_string(),
                    expected: None,
                    actual: Some(1),
                }),
                StatusCode::CONFLICT,
            ),
            (
                SdkError::Config("bad".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (sdk_err, status) in cases {
            let server_err: ServerError = sdk_err.into();
            assert_eq!(server_err.status(), status, "{}", server_err);
        }
    }

    #[test]
    fn test_sdk_error_message_kept() {
        let server_err: ServerError = SdkError::NotFound("adult".to_string()).into();
        assert!(server_err.to_string().contains("Rule not found: adult"));
    }

    #[test]
    fn test_anyhow_error_conversion() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let server_err: ServerError = anyhow_err.into();
        assert!(server_err.to_string().contains("Internal error"));
        assert!(server_err.to_string().contains("something went wrong"));
    }

    #[test]
    fn test_into_response_conflict() {
        let err = ServerError::Conflict("stale".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
