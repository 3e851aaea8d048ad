//! OpenAI Provider implementation
//!
//! Standard OpenAI chat completions with a bearer credential

use super::{read_response, CompletionRequest, Provider, ProviderFailure, ProviderResponse};
use crate::config::ProviderEndpoint;
use crate::models::openai::ChatCompletionRequest;
use crate::models::ProviderKind;
use crate::utils::logging::{redact_credential, truncate_content};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

/// OpenAI Provider
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    /// Create a provider for the given endpoint
    pub fn new(endpoint: &ProviderEndpoint) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("resume-tailor/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: endpoint.base_url.clone(),
            model: endpoint.model.clone(),
        })
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn complete(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<ProviderResponse, ProviderFailure> {
        let payload = ChatCompletionRequest::single_user(&self.model, request.max_tokens, &request.user_message);

        debug!(
            parent: &request.span,
            model = %self.model,
            max_tokens = request.max_tokens,
            credential = %redact_credential(credential),
            prompt = %truncate_content(&request.user_message, 200),
            "Sending OpenAI chat completion request"
        );

        let response = self
            .client
            .post(self.build_url())
            .header("Authorization", format!("Bearer {}", credential))
            .header("Content-Type", "application/json")
            .timeout(request.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(parent: &request.span, "OpenAI request failed before a response: {}", e);
                ProviderFailure::from_transport(&e)
            })?;

        debug!(parent: &request.span, status = response.status().as_u16(), "OpenAI response received");

        read_response(ProviderKind::OpenAI, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let mut endpoint = ProviderEndpoint {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_version: None,
            probe_max_tokens: 5,
        };
        let provider = OpenAIProvider::new(&endpoint).unwrap();
        assert_eq!(provider.build_url(), "https://api.openai.com/v1/chat/completions");

        // Test with trailing slash
        endpoint.base_url = "https://api.openai.com/v1/".to_string();
        let provider = OpenAIProvider::new(&endpoint).unwrap();
        assert_eq!(provider.build_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_provider_kind() {
        let endpoint = ProviderEndpoint {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            api_version: None,
            probe_max_tokens: 5,
        };
        assert_eq!(OpenAIProvider::new(&endpoint).unwrap().kind(), ProviderKind::OpenAI);
    }
}
