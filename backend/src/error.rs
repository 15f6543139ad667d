//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! Validation failures render as `{"errors": [...]}`, everything else as
//! `{"error": "..."}`.

use crate::camp::ValidationError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Placeholder message reported by endpoints that do not surface the
/// specific validation failure
pub const GENERIC_VALIDATION_MESSAGE: &str = "validation errors";

/// Application-level error types
///
/// All errors that can occur in the application are represented by this enum.
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body failed validation
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Camper with the given ID was not found
    #[error("Camper not found")]
    CamperNotFound,

    /// Activity with the given ID was not found
    #[error("Activity not found")]
    ActivityNotFound,

    /// Unknown route or malformed path parameter
    #[error("Not found")]
    NotFound,

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Validation error carrying a single message
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(vec![message.into()])
    }

    /// Validation error carrying the generic placeholder message
    pub fn generic_validation() -> Self {
        Self::validation(GENERIC_VALIDATION_MESSAGE)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::NotFound
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            AppError::CamperNotFound | AppError::ActivityNotFound | AppError::NotFound => {
                (StatusCode::NOT_FOUND, json!({ "error": message }))
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Request failed with internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::generic_validation().into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CamperNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ActivityNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_conversion_keeps_message() {
        match AppError::from(ValidationError::AgeOutOfRange(19)) {
            AppError::Validation(errors) => {
                assert_eq!(errors, vec!["Age must be between 8 and 18".to_string()]);
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }
}
