//! Service API data models
//!
//! JSON bodies accepted and returned by `/generate-resume` and `/validate-key`,
//! plus the validated request-scoped values the pipelines work on

use super::ProviderKind;
use crate::providers::ProviderFailure;
use crate::utils::logging::redact_credential;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /generate-resume`
///
/// Every field is optional on the wire; presence is checked by the generation pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest {
    /// `openai` or `anthropic`, defaults to `openai`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serper_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_posting_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_writeup: Option<String>,
}

/// Validated generation request; every text field is non-empty
#[derive(Clone)]
pub struct GenerationRequest {
    pub provider: ProviderKind,
    pub provider_credential: String,
    pub search_credential: String,
    pub job_posting_url: String,
    pub linkedin_url: String,
    pub personal_writeup: String,
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("provider", &self.provider)
            .field("provider_credential", &redact_credential(&self.provider_credential))
            .field("search_credential", &redact_credential(&self.search_credential))
            .field("job_posting_url", &self.job_posting_url)
            .field("linkedin_url", &self.linkedin_url)
            .field("personal_writeup_len", &self.personal_writeup.len())
            .finish()
    }
}

/// Outcome of a generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    Success,
    PartialSuccess,
    Error,
}

/// Result of a generation call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub status: GenerationStatus,
    pub tailored_resume: String,
    pub interview_materials: String,
    pub provider: ProviderKind,
    /// Shown to the user alongside a partial or failed result
    #[serde(rename = "message", skip_serializing_if = "Option::is_none")]
    pub diagnostic_message: Option<String>,
    /// Failure behind an `Error` status; rendered through `AppError`
    #[serde(skip)]
    pub failure: Option<ProviderFailure>,
}

/// Placeholder returned as interview materials when the model output cannot be split
pub const UNPARSED_INTERVIEW_PLACEHOLDER: &str = "Could not parse interview materials.";

/// Diagnostic attached to partial results
pub const PARTIAL_SUCCESS_MESSAGE: &str = "Response format was unexpected, returning full text";

impl GenerationResult {
    /// Both sections were split out of the model output
    pub fn success(provider: ProviderKind, tailored_resume: String, interview_materials: String) -> Self {
        Self {
            status: GenerationStatus::Success,
            tailored_resume,
            interview_materials,
            provider,
            diagnostic_message: None,
            failure: None,
        }
    }

    /// The model output could not be split; the whole text is returned as the resume
    pub fn partial(provider: ProviderKind, raw_text: String) -> Self {
        Self {
            status: GenerationStatus::PartialSuccess,
            tailored_resume: raw_text,
            interview_materials: UNPARSED_INTERVIEW_PLACEHOLDER.to_string(),
            provider,
            diagnostic_message: Some(PARTIAL_SUCCESS_MESSAGE.to_string()),
            failure: None,
        }
    }

    /// The provider call failed
    pub fn failed(provider: ProviderKind, failure: ProviderFailure) -> Self {
        Self {
            status: GenerationStatus::Error,
            tailored_resume: String::new(),
            interview_materials: String::new(),
            provider,
            diagnostic_message: Some(failure.message().to_string()),
            failure: Some(failure),
        }
    }
}

/// Body of `POST /validate-key`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateKeyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Result of a credential probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCheckResult {
    pub valid: bool,
    /// Always populated, also on success
    #[serde(rename = "message")]
    pub reason: String,
}

impl CredentialCheckResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: "API key is valid".to_string(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
        }
    }
}
