//! Credential validator
//!
//! Prefix check first, then one minimal real call to the provider

use super::client::ProviderClient;
use crate::models::api::CredentialCheckResult;
use crate::models::ProviderKind;
use crate::providers::ProviderFailure;
use crate::utils::logging::redact_credential;
use std::time::Duration;
use tracing::{info, warn, Span};

/// Credential validator
pub struct CredentialValidator {
    client: ProviderClient,
    timeout: Duration,
    span: Span,
}

impl CredentialValidator {
    pub fn new(client: ProviderClient, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            span: Span::none(),
        }
    }

    /// Record validator events under the given span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Check whether a credential is usable with the provider
    pub async fn validate(&self, provider: ProviderKind, credential: &str) -> CredentialCheckResult {
        if let Some(reason) = format_problem(provider, credential) {
            info!(
                parent: &self.span,
                provider = %provider,
                credential = %redact_credential(credential),
                "Credential rejected by format check"
            );
            return CredentialCheckResult::invalid(reason);
        }

        match self.client.probe(provider, credential, self.timeout, &self.span).await {
            Ok(_) => {
                info!(parent: &self.span, provider = %provider, "Credential accepted by provider");
                CredentialCheckResult::valid()
            }
            Err(failure) => {
                warn!(
                    parent: &self.span,
                    provider = %provider,
                    kind = failure.tag(),
                    "Credential probe failed: {}",
                    failure
                );
                CredentialCheckResult::invalid(describe_failure(provider, &failure))
            }
        }
    }
}

/// Prefix check; returns the reason when the credential cannot be right
pub fn format_problem(provider: ProviderKind, credential: &str) -> Option<String> {
    if credential.starts_with(provider.credential_prefix()) {
        return None;
    }

    Some(match provider {
        ProviderKind::Anthropic => {
            "Invalid API key format. Anthropic API keys should start with 'sk-ant-'".to_string()
        }
        ProviderKind::OpenAI => "Invalid API key format. OpenAI API keys typically start with 'sk-'".to_string(),
    })
}

/// User-facing reason for a failed probe
pub fn describe_failure(provider: ProviderKind, failure: &ProviderFailure) -> String {
    match failure {
        ProviderFailure::Auth(message) => {
            format!("Authentication error: {}. Please check your API key.", message)
        }
        ProviderFailure::RateLimit(message) => {
            format!("Rate limit exceeded: {}. Please try again later.", message)
        }
        ProviderFailure::InvalidRequest(message) if provider == ProviderKind::Anthropic => format!(
            "Invalid request: {}. Your API key may be valid but there's an issue with the request.",
            message
        ),
        other => other.message().to_string(),
    }
}
