//! Provider module
//!
//! Defines the Provider trait, the failure taxonomy shared by all providers,
//! and the rules that map vendor error envelopes onto that taxonomy

pub mod anthropic;
pub mod openai;

use crate::models::anthropic::MessagesResponse;
use crate::models::openai::ChatCompletionResponse;
use crate::models::{ProviderErrorEnvelope, ProviderKind};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::Span;

/// Message used when a request left but no response came back
pub const NO_RESPONSE_MESSAGE: &str =
    "No response received from API. Please check your internet connection.";

/// Message used when an error envelope carries no message
const DEFAULT_ERROR_MESSAGE: &str = "Invalid API key";

/// Message used when the request could not be put on the wire
pub const REQUEST_BUILD_MESSAGE: &str =
    "The request could not be built. Please check your API key for invalid characters.";

/// Message used for transport errors that fit no other kind
pub const UNEXPECTED_TRANSPORT_MESSAGE: &str = "Unexpected error while contacting the provider.";

/// Classified provider call failure
///
/// Every variant carries the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    /// Credential or request could not be put on the wire
    #[error("{0}")]
    Format(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    RateLimit(String),
    #[error("{0}")]
    InvalidRequest(String),
    /// No response was received (connect failure, DNS, timeout)
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Unknown(String),
}

/// Ordered `(substring, variant)` rules applied to the lowercased vendor error type.
/// First match wins; no match means [`ProviderFailure::Unknown`].
pub static CLASSIFICATION_RULES: &[(&str, fn(String) -> ProviderFailure)] = &[
    ("auth", ProviderFailure::Auth),
    ("api_key", ProviderFailure::Auth),
    ("rate_limit", ProviderFailure::RateLimit),
    ("invalid_request", ProviderFailure::InvalidRequest),
];

impl ProviderFailure {
    /// Machine tag of the variant
    pub fn tag(&self) -> &'static str {
        match self {
            ProviderFailure::Format(_) => "format_error",
            ProviderFailure::Auth(_) => "auth_error",
            ProviderFailure::RateLimit(_) => "rate_limit_error",
            ProviderFailure::InvalidRequest(_) => "invalid_request_error",
            ProviderFailure::Network(_) => "network_error",
            ProviderFailure::Unknown(_) => "unknown_error",
        }
    }

    /// Display message carried by the variant
    pub fn message(&self) -> &str {
        match self {
            ProviderFailure::Format(m)
            | ProviderFailure::Auth(m)
            | ProviderFailure::RateLimit(m)
            | ProviderFailure::InvalidRequest(m)
            | ProviderFailure::Network(m)
            | ProviderFailure::Unknown(m) => m,
        }
    }

    /// Classify a vendor error type string and message
    pub fn classify(error_type: &str, message: impl Into<String>) -> Self {
        let error_type = error_type.to_lowercase();
        let message = message.into();

        match CLASSIFICATION_RULES
            .iter()
            .find(|(needle, _)| error_type.contains(*needle))
        {
            Some((_, variant)) => variant(message),
            None => ProviderFailure::Unknown(message),
        }
    }

    /// Classify a non-2xx response from its status and raw body
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ProviderErrorEnvelope>(body) {
            Ok(envelope) => {
                let error_type = envelope.error.error_type.unwrap_or_default();
                let message = envelope
                    .error
                    .message
                    .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
                Self::classify(&error_type, message)
            }
            Err(_) => ProviderFailure::Unknown(format!(
                "Unexpected response from provider (HTTP {}): {}",
                status,
                body.trim()
            )),
        }
    }

    /// Map a transport error raised by the HTTP client
    ///
    /// The client's error text stays in the logs; the message carried here is fixed.
    pub fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() || error.is_request() {
            ProviderFailure::Network(NO_RESPONSE_MESSAGE.to_string())
        } else if error.is_builder() {
            ProviderFailure::Format(REQUEST_BUILD_MESSAGE.to_string())
        } else {
            ProviderFailure::Unknown(UNEXPECTED_TRANSPORT_MESSAGE.to_string())
        }
    }
}

/// Single-turn completion parameters
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// The only user message
    pub user_message: String,
    /// Output token budget
    pub max_tokens: u32,
    /// Upper bound for the whole call
    pub timeout: Duration,
    /// Span of the caller; provider events are recorded under it
    pub span: Span,
}

/// Successful (HTTP 200) provider response with its decoded body
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub provider: ProviderKind,
    pub status: u16,
    pub body: serde_json::Value,
}

impl ProviderResponse {
    /// Generated text, concatenated from every text fragment in order
    pub fn text(&self) -> String {
        match self.provider {
            ProviderKind::Anthropic => MessagesResponse::deserialize(&self.body)
                .map(|response| response.text())
                .unwrap_or_default(),
            ProviderKind::OpenAI => ChatCompletionResponse::deserialize(&self.body)
                .map(|response| response.text())
                .unwrap_or_default(),
        }
    }
}

/// Upstream LLM provider
///
/// Implementations perform exactly one HTTP call per `complete`, never retry,
/// and report every failure as a [`ProviderFailure`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which vendor this provider talks to
    fn kind(&self) -> ProviderKind;

    /// Send a single-turn completion with the caller's credential
    async fn complete(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<ProviderResponse, ProviderFailure>;
}

/// Turn a raw HTTP response into a provider response or a classified failure
///
/// Status decides the outcome. A success body that is not JSON decodes to `Null`.
pub(crate) async fn read_response(
    provider: ProviderKind,
    response: reqwest::Response,
) -> Result<ProviderResponse, ProviderFailure> {
    let status = response.status();
    let bytes = response.bytes().await.unwrap_or_default();

    if status.is_success() {
        // A 2xx status alone means success; an undecodable body yields no text
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        return Ok(ProviderResponse {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    Err(ProviderFailure::from_error_body(
        status.as_u16(),
        &String::from_utf8_lossy(&bytes),
    ))
}

pub use anthropic::AnthropicProvider;
pub use openai::OpenAIProvider;
