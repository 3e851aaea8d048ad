//! Credential check handler

use crate::handlers::AppState;
use crate::models::api::{CredentialCheckResult, ValidateKeyRequest};
use crate::models::ProviderKind;
use crate::services::CredentialValidator;
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use tracing::Span;

/// Check a provider credential
///
/// POST /validate-key
pub async fn validate_key(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValidateKeyRequest>, JsonRejection>,
) -> AppResult<Json<CredentialCheckResult>> {
    let Json(request) = payload?;

    let (Some(provider), Some(api_key)) = (
        request.provider.filter(|p| !p.trim().is_empty()),
        request.api_key.filter(|k| !k.trim().is_empty()),
    ) else {
        return Err(AppError::MissingFields(
            "Please provide both provider and apiKey".to_string(),
        ));
    };

    let provider: ProviderKind = provider
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidProvider("Provider must be 'openai' or 'anthropic'".to_string()))?;

    let validator = CredentialValidator::new(state.client.clone(), state.settings.validation.timeout())
        .with_span(Span::current());

    Ok(Json(validator.validate(provider, &api_key).await))
}
