//! Configuration management module
//!
//! Loads service settings from the environment and the prompt profile from file

pub mod file;
pub mod settings;

pub use file::{PromptConfig, RoleProfile};
pub use settings::{ProviderEndpoint, Settings};
