//! Resume generation pipeline
//!
//! validation -> prompt -> provider call -> section split -> result

use super::client::ProviderClient;
use super::parser::ResponseParser;
use super::prompt::PromptBuilder;
use crate::config::settings::GenerationConfig;
use crate::models::api::{GenerateResumeRequest, GenerationRequest, GenerationResult};
use crate::models::ProviderKind;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::truncate_content;
use crate::utils::url::normalize_url;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn, Span};

/// Message for requests lacking a required field
pub const MISSING_FIELDS_MESSAGE: &str = "Please provide all required information";

/// Message for providers not wired for generation
pub const UNSUPPORTED_PROVIDER_MESSAGE: &str = "Currently only Anthropic is supported for direct API calls";

/// Providers that can currently generate
const GENERATION_PROVIDERS: &[ProviderKind] = &[ProviderKind::Anthropic];

/// Generation pipeline
///
/// Built per request; holds no state that outlives the call.
pub struct GenerationPipeline {
    client: ProviderClient,
    prompts: Arc<PromptBuilder>,
    parser: ResponseParser,
    max_tokens: u32,
    timeout: Duration,
    span: Span,
}

impl GenerationPipeline {
    pub fn new(client: ProviderClient, prompts: Arc<PromptBuilder>, config: &GenerationConfig) -> Self {
        Self {
            client,
            prompts,
            parser: ResponseParser::default(),
            max_tokens: config.max_tokens,
            timeout: config.timeout(),
            span: Span::none(),
        }
    }

    /// Record pipeline events under the given span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Use a different response parser
    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    /// Validate and run a request from the wire
    ///
    /// Validation failures are returned as errors before any network call.
    /// Provider failures come back as a result with `Error` status.
    pub async fn generate(&self, request: GenerateResumeRequest) -> AppResult<GenerationResult> {
        let request = Self::validate(request)?;
        Ok(self.run(&request).await)
    }

    /// Check required fields, the provider and its credential
    pub fn validate(request: GenerateResumeRequest) -> AppResult<GenerationRequest> {
        let job_posting_url = normalize_url(request.job_posting_url.as_deref());
        let linkedin_url = normalize_url(request.linkedin_url.as_deref());

        let (Some(search_credential), Some(personal_writeup)) =
            (present(request.serper_api_key), present(request.personal_writeup))
        else {
            return Err(AppError::MissingFields(MISSING_FIELDS_MESSAGE.to_string()));
        };
        if job_posting_url.is_empty() || linkedin_url.is_empty() {
            return Err(AppError::MissingFields(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let provider = match request.llm_provider.as_deref().map(str::trim) {
            None | Some("") => ProviderKind::default(),
            Some(name) => name
                .parse::<ProviderKind>()
                .map_err(|_| AppError::UnsupportedProvider(UNSUPPORTED_PROVIDER_MESSAGE.to_string()))?,
        };
        if !GENERATION_PROVIDERS.contains(&provider) {
            return Err(AppError::UnsupportedProvider(UNSUPPORTED_PROVIDER_MESSAGE.to_string()));
        }

        let credential = match provider {
            ProviderKind::Anthropic => request.anthropic_api_key,
            ProviderKind::OpenAI => request.openai_api_key,
        };
        let provider_credential = present(credential).ok_or(AppError::MissingCredential(provider))?;

        Ok(GenerationRequest {
            provider,
            provider_credential,
            search_credential,
            job_posting_url,
            linkedin_url,
            personal_writeup,
        })
    }

    /// Run a validated request
    pub async fn run(&self, request: &GenerationRequest) -> GenerationResult {
        info!(
            parent: &self.span,
            provider = %request.provider,
            job_posting_url = %request.job_posting_url,
            linkedin_url = %request.linkedin_url,
            writeup_chars = request.personal_writeup.chars().count(),
            "Generating tailored resume"
        );

        let prompt = self.prompts.render(
            Some(&request.job_posting_url),
            &request.linkedin_url,
            &request.personal_writeup,
        );

        let response = match self
            .client
            .complete(
                request.provider,
                &request.provider_credential,
                prompt,
                self.max_tokens,
                self.timeout,
                &self.span,
            )
            .await
        {
            Ok(response) => response,
            Err(failure) => {
                warn!(parent: &self.span, kind = failure.tag(), "Generation failed: {}", failure);
                return GenerationResult::failed(request.provider, failure);
            }
        };

        let text = response.text();
        debug!(parent: &self.span, output = %truncate_content(&text, 200), "Model output received");

        match self.parser.parse(&text) {
            Ok(sections) if !sections.resume.is_empty() && !sections.interview.is_empty() => {
                info!(parent: &self.span, "Resume and interview sections parsed");
                GenerationResult::success(request.provider, sections.resume, sections.interview)
            }
            _ => {
                warn!(parent: &self.span, output_chars = text.chars().count(), "Model output could not be split, returning full text");
                GenerationResult::partial(request.provider, text)
            }
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> GenerateResumeRequest {
        GenerateResumeRequest {
            llm_provider: Some("anthropic".to_string()),
            openai_api_key: None,
            anthropic_api_key: Some("sk-ant-test-key-1234".to_string()),
            serper_api_key: Some("serper-key".to_string()),
            job_posting_url: Some("@https://jobs.example/1".to_string()),
            linkedin_url: Some(" https://linkedin.com/in/jane ".to_string()),
            personal_writeup: Some("I build things.".to_string()),
        }
    }

    #[test]
    fn test_validate_normalizes_urls() {
        let request = GenerationPipeline::validate(complete_request()).unwrap();
        assert_eq!(request.provider, ProviderKind::Anthropic);
        assert_eq!(request.job_posting_url, "https://jobs.example/1");
        assert_eq!(request.linkedin_url, "https://linkedin.com/in/jane");
    }

    #[test]
    fn test_validate_missing_fields() {
        for strip in 0..4 {
            let mut request = complete_request();
            match strip {
                0 => request.serper_api_key = None,
                1 => request.job_posting_url = Some("@ ".to_string()),
                2 => request.linkedin_url = None,
                _ => request.personal_writeup = Some("   ".to_string()),
            }
            let err = GenerationPipeline::validate(request).unwrap_err();
            assert!(matches!(err, AppError::MissingFields(_)));
        }
    }

    #[test]
    fn test_validate_openai_unsupported() {
        let mut request = complete_request();
        request.llm_provider = Some("openai".to_string());
        request.openai_api_key = Some("sk-test".to_string());
        assert!(matches!(
            GenerationPipeline::validate(request),
            Err(AppError::UnsupportedProvider(_))
        ));

        // default provider is openai
        let mut request = complete_request();
        request.llm_provider = None;
        assert!(matches!(
            GenerationPipeline::validate(request),
            Err(AppError::UnsupportedProvider(_))
        ));

        let mut request = complete_request();
        request.llm_provider = Some("gemini".to_string());
        assert!(matches!(
            GenerationPipeline::validate(request),
            Err(AppError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_validate_missing_credential() {
        let mut request = complete_request();
        request.anthropic_api_key = Some(String::new());
        assert!(matches!(
            GenerationPipeline::validate(request),
            Err(AppError::MissingCredential(ProviderKind::Anthropic))
        ));
    }
}
