//! Resume generation handler

use crate::handlers::AppState;
use crate::models::api::{GenerateResumeRequest, GenerationResult};
use crate::services::GenerationPipeline;
use crate::utils::error::{AppError, AppResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::Span;

/// Generate a tailored resume
///
/// POST /generate-resume
pub async fn generate_resume(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateResumeRequest>, JsonRejection>,
) -> AppResult<GenerationResult> {
    let Json(request) = payload?;

    let pipeline = GenerationPipeline::new(
        state.client.clone(),
        state.prompts.clone(),
        &state.settings.generation,
    )
    .with_span(Span::current());

    pipeline.generate(request).await
}

impl IntoResponse for GenerationResult {
    fn into_response(self) -> Response {
        match self.failure {
            Some(failure) => AppError::Provider(failure).into_response(),
            None => (StatusCode::OK, Json(self)).into_response(),
        }
    }
}
