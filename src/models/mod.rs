//! Data models module
//!
//! Defines the public wire types and the provider payloads for Anthropic and OpenAI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod anthropic;
pub mod api;
pub mod openai;

/// LLM vendor a request is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions
    #[default]
    OpenAI,
    /// Anthropic messages
    Anthropic,
}

impl ProviderKind {
    /// Identifier used on the wire and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Vendor name for user-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
        }
    }

    /// Prefix every credential for this provider starts with
    pub fn credential_prefix(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "sk-",
            ProviderKind::Anthropic => "sk-ant-",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a provider name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Error envelope returned by both vendors on non-2xx responses
///
/// Anthropic: `{"type": "error", "error": {"type": ..., "message": ...}}`
/// OpenAI: `{"error": {"message": ..., "type": ..., "code": ...}}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderErrorEnvelope {
    #[serde(default)]
    pub error: ProviderErrorBody,
}

/// Inner error object of [`ProviderErrorEnvelope`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderErrorBody {
    /// Vendor error type, e.g. `authentication_error`
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Human readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Vendor error code (OpenAI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<serde_json::Value>,
}
