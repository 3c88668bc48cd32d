//! Error types for configuration, request integrity, and the users resource.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Startup configuration errors.
///
/// All variants are fatal: the process refuses to start rather than fall
/// back to a guessable default.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_SECRET is not set")]
    MissingSecret,

    #[error("API_SECRET is empty")]
    EmptySecret,

    #[error("API_SECRET cannot be used as an HMAC key")]
    InvalidSecret,

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Per-request integrity failures.
///
/// The `Display` text is the detailed reason. Whether it reaches the client
/// depends on `IntegrityConfig::uniform_rejections`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("Missing security headers")]
    MissingHeaders,

    #[error("Request expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,
}

impl IntegrityError {
    /// Stable label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrityError::MissingHeaders => "missing_headers",
            IntegrityError::Expired => "expired",
            IntegrityError::InvalidSignature => "invalid_signature",
        }
    }
}

/// Errors that abort application startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("logging initialization failed: {0}")]
    Logging(String),
}

/// Errors raised by the users resource handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User {0} not found")]
    NotFound(u32),

    #[error("{0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for API endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: message.into(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            // Internal details stay in the logs
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(status).json(ErrorBody::new(status, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_error_labels_are_stable() {
        assert_eq!(IntegrityError::MissingHeaders.as_str(), "missing_headers");
        assert_eq!(IntegrityError::Expired.as_str(), "expired");
        assert_eq!(IntegrityError::InvalidSignature.as_str(), "invalid_signature");
    }

    #[test]
    fn api_error_status_codes() {
        assert_eq!(ApiError::NotFound(7).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("lock".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_error_message_is_not_exposed() {
        let resp = ApiError::Internal("poisoned lock in store".into()).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
