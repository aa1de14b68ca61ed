//! Response types for the Refund Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Response body for `POST /policies/:id/evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// The evaluated policy.
    pub policy_id: String,
    /// The input, echoed back.
    pub hours_before_departure: Decimal,
    /// Threshold of the rule that was selected.
    pub selected_threshold: u32,
    /// Share of the original amount withheld.
    pub penalty_percentage: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "INVALID_TRANSITION",
                    message,
                    "The action does not match the refund's current review stage",
                ),
            ),
            EngineError::TerminalState { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("TERMINAL_STATE", message),
            ),
            EngineError::ConcurrentModification { .. } => (
                StatusCode::CONFLICT,
                ApiError::with_details(
                    "CONCURRENT_MODIFICATION",
                    message,
                    "Reload the refund and retry the action",
                ),
            ),
            EngineError::DuplicateRefund { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_REFUND", message),
            ),
            EngineError::MissingReason => (
                StatusCode::BAD_REQUEST,
                ApiError::new("MISSING_REASON", message),
            ),
            EngineError::MissingActor => (
                StatusCode::BAD_REQUEST,
                ApiError::new("MISSING_ACTOR", message),
            ),
            EngineError::InvalidBooking { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_BOOKING",
                    message,
                    "The booking data contains invalid information",
                ),
            ),
            EngineError::PolicyNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("POLICY_NOT_FOUND", message),
            ),
            EngineError::BookingNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("BOOKING_NOT_FOUND", message),
            ),
            EngineError::RefundNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("REFUND_NOT_FOUND", message),
            ),
            EngineError::PolicyConfiguration { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("POLICY_CONFIGURATION_ERROR", "Policy configuration error", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::StoreUnavailable { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Storage error", message),
            ),
        };
        Self { status, error }
    }
}
