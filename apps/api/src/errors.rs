use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::accounts::AccountError;
use crate::planner::PlannerError;
use crate::roadmap::GenerationFailure;
use crate::storage::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Roadmap generation failed: {0}")]
    Generation(GenerationFailure),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::AlreadyExists(_) | AccountError::Conflict { .. } => {
                AppError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            AccountError::NotFound(_) => AppError::NotFound(err.to_string()),
            AccountError::Validation(msg) => AppError::Validation(msg),
            AccountError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::InvalidProfile(msg) => AppError::Validation(msg),
            PlannerError::GenerationInProgress => AppError::Conflict(err.to_string()),
            PlannerError::Generation(failure) => AppError::Generation(failure),
            PlannerError::Account(e) => e.into(),
            PlannerError::Task(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Generation(failure) => {
                tracing::warn!("Generation failure ({}): {failure}", failure.reason());
                let code = match failure {
                    GenerationFailure::EmptyResponse => "EMPTY_RESPONSE",
                    GenerationFailure::InvalidJson(_) => "INVALID_JSON",
                    GenerationFailure::TransportError(_) => "TRANSPORT_ERROR",
                    GenerationFailure::SchemaViolation(_) => "SCHEMA_VIOLATION",
                };
                (
                    StatusCode::BAD_GATEWAY,
                    code,
                    format!("Error generating roadmap: {failure}"),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
