//! Resume Tailor Library
//!
//! Asks an LLM provider for a resume tailored to a job posting plus interview
//! preparation notes, and checks provider credentials before they are spent

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{PromptConfig, Settings};
pub use handlers::{create_router, router_with_state, AppState};
pub use models::ProviderKind;
pub use providers::{Provider, ProviderFailure};
pub use services::{CredentialValidator, GenerationPipeline, PromptBuilder, ProviderClient, ResponseParser};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
