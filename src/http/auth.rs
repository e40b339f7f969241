//! # API Key Gate
//!
//! Static API key check applied ahead of routing. The check itself is a
//! pure function from headers to a [`Gate`], so the pass/reject decision is
//! testable without a running server.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::errors::ApiError;

/// Header clients supply the key in
pub const API_KEY_HEADER: &str = "x-api-key";

/// Outcome of the pre-routing auth stage
pub enum Gate {
    /// Request may proceed unchanged
    Continue,
    /// Request is short-circuited with this response
    Reject(Response),
}

/// Holds the configured secret for exact comparison
#[derive(Clone)]
pub struct ApiKeyAuth {
    secret: String,
}

impl ApiKeyAuth {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    /// Check the request headers: absent key rejects with 401, any
    /// non-matching value (including non-UTF-8) rejects with 403.
    pub fn check(&self, headers: &HeaderMap) -> Gate {
        match headers.get(API_KEY_HEADER) {
            None => Gate::Reject(ApiError::MissingApiKey.into_response()),
            Some(value) => match value.to_str() {
                Ok(key) if key == self.secret => Gate::Continue,
                _ => Gate::Reject(ApiError::InvalidApiKey.into_response()),
            },
        }
    }
}

/// Middleware layer wrapping [`ApiKeyAuth::check`]
pub async fn require_api_key(
    State(auth): State<ApiKeyAuth>,
    request: Request,
    next: Next,
) -> Response {
    match auth.check(request.headers()) {
        Gate::Continue => next.run(request).await,
        Gate::Reject(response) => response,
    }
}
