//! Mapping of handler failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use employee_repository::StoreError;

/// Errors returned by request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No employee has the requested identifier.
    #[error("Employee not found: {0}")]
    NotFound(String),

    /// The store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The store is reachable but not usable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// No route matches the request path.
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// The path exists but not for this method.
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// A middleware failed for a reason other than a timeout.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create a not found error for the given identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// The HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Maps `ApiError` to a JSON body `{"error", "status"}` with the matching status code.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "server error");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "client error");
        }
        let body = json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("eof").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("e-1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(StoreError::query("boom")).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::unavailable("red").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::MethodNotAllowed("PUT /employees".into()).status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(ApiError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::not_found("e-1").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_error_message_passes_through() {
        let err = ApiError::from(StoreError::connection("refused"));
        assert_eq!(err.to_string(), "Connection error: refused");
    }
}
