//! Anthropic Provider implementation
//!
//! Calls the Anthropic messages endpoint with an `x-api-key` credential

use super::{read_response, CompletionRequest, Provider, ProviderFailure, ProviderResponse};
use crate::config::ProviderEndpoint;
use crate::models::anthropic::MessagesRequest;
use crate::models::ProviderKind;
use crate::utils::logging::{redact_credential, truncate_content};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// Default `anthropic-version` header value
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Anthropic Provider
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    api_version: String,
}

impl AnthropicProvider {
    /// Create a provider for the given endpoint
    pub fn new(endpoint: &ProviderEndpoint) -> Result<Self> {
        // Timeouts are applied per request
        let client = Client::builder()
            .user_agent(concat!("resume-tailor/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
            api_version: endpoint
                .api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn complete(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<ProviderResponse, ProviderFailure> {
        let payload = MessagesRequest::single_user(&self.model, request.max_tokens, &request.user_message);

        debug!(
            parent: &request.span,
            model = %self.model,
            max_tokens = request.max_tokens,
            timeout_ms = request.timeout.as_millis() as u64,
            credential = %redact_credential(credential),
            prompt = %truncate_content(&request.user_message, 200),
            "Sending Anthropic messages request"
        );

        let response = self
            .client
            .post(self.build_url())
            .header("x-api-key", credential)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .timeout(request.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(parent: &request.span, "Anthropic request failed before a response: {}", e);
                ProviderFailure::from_transport(&e)
            })?;

        debug!(parent: &request.span, status = response.status().as_u16(), "Anthropic response received");

        read_response(ProviderKind::Anthropic, response).await
    }
}
