//! Provider client service
//!
//! Dispatches completion calls to the provider registered for a `ProviderKind`

use crate::config::Settings;
use crate::models::ProviderKind;
use crate::providers::{
    AnthropicProvider, CompletionRequest, OpenAIProvider, Provider, ProviderFailure, ProviderResponse,
};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, Span};

/// User message sent by credential probes
pub const PROBE_MESSAGE: &str = "Hello";

#[derive(Clone)]
struct Registered {
    provider: Arc<dyn Provider>,
    probe_max_tokens: u32,
}

/// Provider client
///
/// Holds one provider per kind. Cheap to clone; the underlying HTTP clients are shared.
#[derive(Clone, Default)]
pub struct ProviderClient {
    providers: HashMap<ProviderKind, Registered>,
}

impl ProviderClient {
    /// Create a client with both vendors configured from settings
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self::default()
            .with_provider(
                Arc::new(AnthropicProvider::new(&settings.anthropic)?),
                settings.anthropic.probe_max_tokens,
            )
            .with_provider(
                Arc::new(OpenAIProvider::new(&settings.openai)?),
                settings.openai.probe_max_tokens,
            ))
    }

    /// Register a provider, replacing any provider of the same kind
    pub fn with_provider(mut self, provider: Arc<dyn Provider>, probe_max_tokens: u32) -> Self {
        self.providers.insert(
            provider.kind(),
            Registered {
                provider,
                probe_max_tokens,
            },
        );
        self
    }

    /// Whether a provider is registered for the kind
    pub fn supports(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Send a single-turn completion
    pub async fn complete(
        &self,
        kind: ProviderKind,
        credential: &str,
        user_message: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
        span: &Span,
    ) -> Result<ProviderResponse, ProviderFailure> {
        let registered = self.lookup(kind)?;
        let request = CompletionRequest {
            user_message: user_message.into(),
            max_tokens,
            timeout,
            span: span.clone(),
        };

        debug!(parent: span, provider = %kind, max_tokens, "Dispatching completion");
        registered.provider.complete(credential, &request).await
    }

    /// Send the minimal probe used to check a credential
    pub async fn probe(
        &self,
        kind: ProviderKind,
        credential: &str,
        timeout: Duration,
        span: &Span,
    ) -> Result<ProviderResponse, ProviderFailure> {
        let max_tokens = self.lookup(kind)?.probe_max_tokens;
        self.complete(kind, credential, PROBE_MESSAGE, max_tokens, timeout, span)
            .await
    }

    fn lookup(&self, kind: ProviderKind) -> Result<&Registered, ProviderFailure> {
        self.providers.get(&kind).ok_or_else(|| {
            ProviderFailure::Unknown(format!("No provider configured for {}", kind.display_name()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingProvider {
        seen: Mutex<Vec<(String, u32)>>,
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Anthropic
        }

        async fn complete(
            &self,
            _credential: &str,
            request: &CompletionRequest,
        ) -> Result<ProviderResponse, ProviderFailure> {
            self.seen
                .lock()
                .unwrap()
                .push((request.user_message.clone(), request.max_tokens));
            Ok(ProviderResponse {
                provider: ProviderKind::Anthropic,
                status: 200,
                body: serde_json::json!({}),
            })
        }
    }

    #[tokio::test]
    async fn test_probe_uses_probe_budget() {
        let provider = Arc::new(RecordingProvider {
            seen: Mutex::new(Vec::new()),
        });
        let client = ProviderClient::default().with_provider(provider.clone(), 10);

        client
            .probe(ProviderKind::Anthropic, "sk-ant-x", Duration::from_secs(1), &Span::none())
            .await
            .unwrap();

        assert_eq!(provider.seen.lock().unwrap()[0], ("Hello".to_string(), 10));
    }

    #[tokio::test]
    async fn test_unregistered_provider() {
        let client = ProviderClient::default();
        assert!(!client.supports(ProviderKind::OpenAI));

        let err = client
            .complete(ProviderKind::OpenAI, "sk-x", "hi", 5, Duration::from_secs(1), &Span::none())
            .await
            .unwrap_err();
        assert_eq!(err.tag(), "unknown_error");
    }
}
