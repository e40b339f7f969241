//! # API Errors
//!
//! Request-level error taxonomy and its mapping to HTTP status codes and
//! JSON bodies. Database detail is logged here and never reaches the
//! response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Required query parameters are missing
    #[error("{0}")]
    MissingParams(&'static str),

    /// Path id did not parse as a number
    #[error("Invalid product id")]
    InvalidProductId,

    /// No `x-api-key` header on the request
    #[error("Missing API key")]
    MissingApiKey,

    /// `x-api-key` header does not match the configured secret
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Query succeeded but matched no rows
    #[error("{0}")]
    NotFound(&'static str),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Database failure in a price lookup
    #[error("Database error")]
    Database(#[source] StoreError),

    /// Database failure in the bundle-contents join
    #[error("Database query failed")]
    PackLookup(#[source] StoreError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParams(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidProductId => StatusCode::BAD_REQUEST,

            ApiError::MissingApiKey => StatusCode::UNAUTHORIZED,
            ApiError::InvalidApiKey => StatusCode::FORBIDDEN,

            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PackLookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Not-found response body; empty result sets report a `message`, not an
/// `error`
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(source) | ApiError::PackLookup(source) => {
                tracing::error!(error = %source, "database query failed");
            }
            _ => {}
        }

        let status = self.status_code();

        match &self {
            ApiError::NotFound(message) => {
                let body = NotFoundResponse {
                    message: (*message).to_string(),
                };
                (status, Json(body)).into_response()
            }
            _ => {
                let body = ErrorResponse {
                    error: self.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingParams("param").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidProductId.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MissingApiKey.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidApiKey.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotFound("nothing").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_messages_never_leak_database_detail() {
        let err = ApiError::Database(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.to_string(), "Database error");

        let err = ApiError::PackLookup(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.to_string(), "Database query failed");
    }
}
