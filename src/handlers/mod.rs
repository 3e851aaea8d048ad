//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod generate;
pub mod health;
pub mod validate;

use crate::config::{PromptConfig, Settings};
use crate::middleware::logging::request_logging_middleware;
use crate::services::{PromptBuilder, ProviderClient};
use crate::utils::error::AppError;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub client: ProviderClient,
    pub prompts: Arc<PromptBuilder>,
}

impl AppState {
    /// Build state with providers configured from settings
    pub fn new(settings: Settings, prompt_config: PromptConfig) -> Result<Self> {
        let client = ProviderClient::new(&settings)?;
        Ok(Self::with_client(settings, prompt_config, client))
    }

    /// Build state around an existing provider client
    pub fn with_client(settings: Settings, prompt_config: PromptConfig, client: ProviderClient) -> Self {
        Self {
            settings,
            client,
            prompts: Arc::new(PromptBuilder::new(prompt_config)),
        }
    }
}

/// Create application router
pub fn create_router(settings: Settings, prompt_config: PromptConfig) -> Result<Router> {
    let state = AppState::new(settings, prompt_config)?;
    Ok(router_with_state(state))
}

/// Create the router around prepared state
pub fn router_with_state(state: AppState) -> Router {
    let max_request_size = state.settings.request.max_request_size;
    let cors = cors_layer(&state.settings);

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_request_size));

    // Same endpoints at the root and under /api
    Router::new()
        .merge(endpoints())
        .nest("/api", endpoints())
        .with_state(Arc::new(state))
        .layer(middleware_stack)
}

fn endpoints() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-resume", post(generate::generate_resume))
        .route("/validate-key", post(validate::validate_key))
        .route("/health", get(health::health_check))
}

fn cors_layer(settings: &Settings) -> CorsLayer {
    let security = &settings.security;
    if !security.cors_enabled {
        return CorsLayer::new();
    }

    let layer = CorsLayer::new().allow_methods(AnyOrigin).allow_headers(AnyOrigin);
    if security.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(AnyOrigin);
    }

    let origins: Vec<HeaderValue> = security
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Turn a handler panic into the `Server error` response
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {}", detail);

    AppError::Server("An unexpected error occurred".to_string()).into_response()
}
