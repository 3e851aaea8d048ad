//! Resume Tailor Server
//!
//! HTTP service generating tailored resumes and interview preparation notes

use anyhow::{Context, Result};
use resume_tailor::config::settings::LoggingConfig;
use resume_tailor::{create_router, version_info, PromptConfig, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load settings from environment (.env supported)
    let settings = Settings::new().context("Failed to load server settings")?;

    // Initialize logging
    init_logging(&settings.logging)?;
    info!("{}", version_info());

    // Load the role profile and prompt template
    let prompt_config = PromptConfig::load_or_default(settings.prompt.config_path.as_deref())
        .context("Failed to load prompt configuration")?;
    info!("Prompt configuration loaded for role: {}", prompt_config.role.title);

    let addr = settings.bind_address();

    // Create router
    let app = create_router(settings, prompt_config)?;

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Resume Tailor server started on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}

/// Initialize logging system
fn init_logging(config: &LoggingConfig) -> Result<()> {
    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (production environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .finish(),
        )
    } else {
        // Human readable format (development environment)
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(config.level.as_str())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    info!("Logging system initialized");
    Ok(())
}
