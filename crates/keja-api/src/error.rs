// ============================================================================
// Keja API - Error Mapping
// File: crates/keja-api/src/error.rs
// Description: Domain failures to HTTP status codes and the error envelope
// ============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use keja_core::error::DomainError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            ApiError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let message = match self {
            ApiError::DatabaseError(msg) | ApiError::InternalError(msg) => {
                tracing::error!("{}: {}", code, msg);
                // Internals stay in the logs
                "An internal error occurred".to_string()
            }
            ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Validation(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unavailable(msg) => {
                tracing::warn!("{}: {}", code, msg);
                msg
            }
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::ValidationError(_) => ApiError::Validation(message),
            DomainError::PropertyNotFound(_)
            | DomainError::UnitNotFound(_)
            | DomainError::TenantNotFound(_)
            | DomainError::PaymentNotFound(_)
            | DomainError::MaintenanceRequestNotFound(_) => ApiError::NotFound(message),
            DomainError::UnitNumberAlreadyExists(_)
            | DomainError::UnitAlreadyOccupied(_)
            | DomainError::UnitNotOccupied(_)
            | DomainError::UnitOccupied(_)
            | DomainError::UnitHasHistory(_)
            | DomainError::InvalidStatusTransition { .. } => ApiError::Conflict(message),
            DomainError::DatabaseError(_) => ApiError::DatabaseError(message),
            DomainError::ConsistencyError(_) | DomainError::ExportError(_) | DomainError::InternalError(_) => {
                ApiError::InternalError(message)
            }
        }
    }
}
