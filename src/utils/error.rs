//! Error handling module
//!
//! Maps the service's error taxonomy onto HTTP responses

use crate::models::ProviderKind;
use crate::providers::ProviderFailure;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message for bodies over the size limit
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "The request body is too large";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field is absent or empty
    #[error("{0}")]
    MissingFields(String),

    /// The credential for the selected provider is absent
    #[error("Please provide an {} API key", .0.display_name())]
    MissingCredential(ProviderKind),

    /// Provider is known but not wired for generation
    #[error("{0}")]
    UnsupportedProvider(String),

    /// Provider name is not recognized
    #[error("{0}")]
    InvalidProvider(String),

    /// Body is not valid JSON for the endpoint
    #[error("{0}")]
    MalformedBody(String),

    /// Body exceeds the configured size limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Classified upstream failure
    #[error("{0}")]
    Provider(#[from] ProviderFailure),

    /// Internal server error
    #[error("{0}")]
    Server(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-facing tag
    pub error: String,
    /// Text meant for direct display
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields(_)
            | AppError::MissingCredential(_)
            | AppError::UnsupportedProvider(_)
            | AppError::InvalidProvider(_)
            | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Provider(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the `error` tag of the response body
    pub fn error_tag(&self) -> &'static str {
        match self {
            AppError::MissingFields(_) => "Missing required fields",
            AppError::MissingCredential(ProviderKind::Anthropic) => "Missing Anthropic API key",
            AppError::MissingCredential(ProviderKind::OpenAI) => "Missing OpenAI API key",
            AppError::UnsupportedProvider(_) => "Unsupported provider",
            AppError::InvalidProvider(_) => "Invalid provider",
            AppError::MalformedBody(_) => "Invalid request body",
            AppError::PayloadTooLarge(_) => "Request too large",
            AppError::Provider(ProviderFailure::Network(_)) => "Network Error",
            AppError::Provider(ProviderFailure::Format(_)) => "Request Error",
            AppError::Provider(_) => "API Error",
            AppError::Server(_) => "Server error",
        }
    }

    /// Whether this is a client mistake rather than a service fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to the response body
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_tag().to_string(),
            message: self.to_string(),
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_client_error() {
            tracing::warn!("Client error: {} - Status code: {}", self.error_tag(), status);
        } else {
            tracing::error!("Application error: {}: {} - Status code: {}", self.error_tag(), self, status);
        }

        (status, Json(self.to_error_response())).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
        } else {
            AppError::MalformedBody(rejection.body_text())
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::MissingFields("x".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MissingCredential(ProviderKind::Anthropic).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::MalformedBody("x".to_string()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Provider(ProviderFailure::Auth("x".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Server("x".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_provider_error_tags() {
        let tag = |f: ProviderFailure| AppError::Provider(f).error_tag();
        assert_eq!(tag(ProviderFailure::Network("x".to_string())), "Network Error");
        assert_eq!(tag(ProviderFailure::Format("x".to_string())), "Request Error");
        assert_eq!(tag(ProviderFailure::Auth("x".to_string())), "API Error");
        assert_eq!(tag(ProviderFailure::RateLimit("x".to_string())), "API Error");
        assert_eq!(tag(ProviderFailure::Unknown("x".to_string())), "API Error");
    }

    #[test]
    fn test_missing_credential_message() {
        let err = AppError::MissingCredential(ProviderKind::Anthropic);
        assert_eq!(err.error_tag(), "Missing Anthropic API key");
        assert_eq!(err.to_string(), "Please provide an Anthropic API key");
    }

    #[test]
    fn test_payload_too_large() {
        let err = AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string());
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.error_tag(), "Request too large");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_error_response_body() {
        let body = AppError::Provider(ProviderFailure::Auth("Invalid API key".to_string())).to_error_response();
        assert_eq!(body.error, "API Error");
        assert_eq!(body.message, "Invalid API key");
    }
}
