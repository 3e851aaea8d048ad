//! Service layer module
//!
//! Contains the provider client, prompt builder, response parser and the two request pipelines

pub mod client;
pub mod generator;
pub mod parser;
pub mod prompt;
pub mod validator;

pub use client::ProviderClient;
pub use generator::GenerationPipeline;
pub use parser::{ParseIncomplete, ParsedSections, ResponseParser};
pub use prompt::PromptBuilder;
pub use validator::CredentialValidator;
