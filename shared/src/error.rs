//! Error types for the beanbridge workspace
//!
//! One unified error type covers the whole pipeline: webhook authentication,
//! boundary validation, upstream provider failures and cart mutation
//! conflicts. Every variant maps to a stable error code and an HTTP status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::ApiResponse;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Missing webhook signature (401)
    Unauthenticated,
    /// Signature mismatch (403)
    Forbidden,
    /// Resource not found (404)
    NotFound,
    /// Retryable mutation conflict (409)
    Conflict,
    /// Upstream provider rejected the request (502)
    Upstream,
    /// Upstream provider unreachable (504)
    Network,
    /// Missing or invalid configuration (500)
    Configuration,
    /// Internal server error (500)
    Internal,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Upstream => StatusCode::BAD_GATEWAY,
            Self::Network => StatusCode::GATEWAY_TIMEOUT,
            Self::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::Unauthenticated => "E3001",
            Self::Forbidden => "E3002",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::Upstream => "E5001",
            Self::Network => "E5002",
            Self::Configuration => "E9001",
            Self::Internal => "E9002",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the bridge service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed boundary validation
    #[error("{message}")]
    Validation { message: String },

    /// Webhook signature header missing
    #[error("Missing webhook signature")]
    Unauthenticated,

    /// Webhook signature mismatch
    #[error("Invalid webhook signature")]
    Forbidden,

    /// Resource not found
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Another mutation holds the per-cart lock; the caller should retry
    #[error("Cart is busy: {cart_id}")]
    MutationRace { cart_id: String },

    /// Upstream provider returned a non-2xx response
    #[error("Upstream error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    /// Request was sent but no response was received
    #[error("Upstream unreachable: {message}")]
    Network { message: String },

    /// Missing or invalid configuration (fail closed)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::Validation { .. } => ApiErrorCode::Validation,
            Self::Unauthenticated => ApiErrorCode::Unauthenticated,
            Self::Forbidden => ApiErrorCode::Forbidden,
            Self::NotFound { .. } => ApiErrorCode::NotFound,
            Self::MutationRace { .. } => ApiErrorCode::Conflict,
            Self::Upstream { .. } => ApiErrorCode::Upstream,
            Self::Network { .. } => ApiErrorCode::Network,
            Self::Configuration { .. } => ApiErrorCode::Configuration,
            Self::Internal { .. } => ApiErrorCode::Internal,
        }
    }

    /// Whether the caller can expect a retry of the same request to succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MutationRace { .. } | Self::Network { .. })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = code.status_code();

        // Configuration details stay in the logs, not in the response body.
        let message = match &self {
            Self::Configuration { message } => {
                tracing::error!(detail = %message, "Configuration error");
                "Service misconfigured".to_string()
            }
            other => other.to_string(),
        };

        let body = ApiResponse::<()>::error(code.code(), message);
        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_webhook_contract() {
        assert_eq!(
            ApiError::Unauthenticated.error_code().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden.error_code().status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::configuration("secret missing").error_code().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::validation("bad payload").error_code().status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn mutation_race_is_retryable_conflict() {
        let err = ApiError::MutationRace { cart_id: "c1".into() };
        assert_eq!(err.error_code(), ApiErrorCode::Conflict);
        assert!(err.is_retryable());
        assert!(!ApiError::Forbidden.is_retryable());
    }
}
