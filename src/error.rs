// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A form field was not a finite, strictly positive number.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation referenced a workout id the store does not hold.
    #[error("Workout not found: {0}")]
    NotFound(String),

    #[error("Duplicate workout id: {0}")]
    DuplicateId(String),

    /// The persisted payload could not be read back.
    #[error("Persisted workouts are corrupt: {0}")]
    PersistenceCorrupt(String),

    #[error("Positioning unavailable: {0}")]
    PositioningUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to the user when a form submission is rejected.
    pub const INVALID_INPUT_MESSAGE: &'static str = "Inputs have to be positive numbers!";

    /// Message shown to the user when the initial position cannot be obtained.
    pub const POSITION_MESSAGE: &'static str = "Could not get your position";

    /// Whether the error should be surfaced to the user rather than only logged.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_) | AppError::PositioningUnavailable(_)
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::InvalidInput(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_input",
                Some(msg.clone()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::DuplicateId(msg) => (StatusCode::CONFLICT, "duplicate_id", Some(msg.clone())),
            AppError::PositioningUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "positioning_unavailable",
                Some(msg.clone()),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::PersistenceCorrupt(msg) => {
                tracing::error!(error = %msg, "Persisted payload corrupt");
                (StatusCode::INTERNAL_SERVER_ERROR, "persistence_corrupt", None)
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers and services
pub type Result<T> = std::result::Result<T, AppError>;
