//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use store::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client (malformed path or query input).
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::InsufficientStock { .. }
        | DomainError::InvalidTransition { .. }
        | DomainError::InvalidState { .. }
        | DomainError::DuplicateEmail { .. }
        | DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::Store(store_err) => store_error_status(store_err),
    };
    (status, err.to_string())
}

fn store_error_status(err: &StoreError) -> StatusCode {
    match err {
        // Constraint refusals are client-resolvable conflicts.
        StoreError::ForeignKey { .. }
        | StoreError::UniqueViolation { .. }
        | StoreError::NegativeStock { .. } => StatusCode::CONFLICT,
        _ => {
            tracing::error!(error = %err, "storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}
