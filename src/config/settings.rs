//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Anthropic messages endpoint
    pub anthropic: ProviderEndpoint,
    /// OpenAI chat completions endpoint
    pub openai: ProviderEndpoint,
    /// Generation call parameters
    pub generation: GenerationConfig,
    /// Credential probe parameters
    pub validation: ValidationConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Prompt configuration file location
    pub prompt: PromptSettings,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Upstream provider endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// API base URL
    pub base_url: String,
    /// Model used for both generation and probes
    pub model: String,
    /// Version header value, where the vendor requires one
    pub api_version: Option<String>,
    /// Output budget of a credential probe
    pub probe_max_tokens: u32,
}

/// Generation call parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Output token budget
    pub max_tokens: u32,
    /// Call timeout in seconds
    pub timeout: u64,
}

/// Credential probe parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Probe timeout in seconds
    pub timeout: u64,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directives
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

/// Prompt configuration file location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Explicit path; the default search locations are used when unset
    pub config_path: Option<String>,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl ValidationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5001,
            },
            anthropic: ProviderEndpoint {
                base_url: "https://api.anthropic.com".to_string(),
                model: "claude-3-haiku-20240307".to_string(),
                api_version: Some("2023-06-01".to_string()),
                probe_max_tokens: 10,
            },
            openai: ProviderEndpoint {
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-3.5-turbo".to_string(),
                api_version: None,
                probe_max_tokens: 5,
            },
            generation: GenerationConfig {
                max_tokens: 4000,
                timeout: 180,
            },
            validation: ValidationConfig { timeout: 30 },
            request: RequestConfig {
                max_request_size: 1024 * 1024,
            },
            security: SecurityConfig {
                allowed_origins: vec!["*".to_string()],
                cors_enabled: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
            prompt: PromptSettings::default(),
        }
    }
}

impl Settings {
    /// Create a new configuration instance from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let settings = Self {
            server: ServerConfig {
                host: text("SERVER_HOST", &defaults.server.host),
                port: parse_or(&lookup, "SERVER_PORT", defaults.server.port)
                    .context("Invalid port number")?,
            },
            anthropic: ProviderEndpoint {
                base_url: text("ANTHROPIC_BASE_URL", &defaults.anthropic.base_url),
                model: text("ANTHROPIC_MODEL", &defaults.anthropic.model),
                api_version: lookup("ANTHROPIC_VERSION").or_else(|| defaults.anthropic.api_version.clone()),
                probe_max_tokens: defaults.anthropic.probe_max_tokens,
            },
            openai: ProviderEndpoint {
                base_url: text("OPENAI_BASE_URL", &defaults.openai.base_url),
                model: text("OPENAI_MODEL", &defaults.openai.model),
                api_version: None,
                probe_max_tokens: defaults.openai.probe_max_tokens,
            },
            generation: GenerationConfig {
                max_tokens: parse_or(&lookup, "GENERATION_MAX_TOKENS", defaults.generation.max_tokens)
                    .context("Invalid generation token budget")?,
                timeout: parse_or(&lookup, "GENERATION_TIMEOUT", defaults.generation.timeout)
                    .context("Invalid generation timeout")?,
            },
            validation: ValidationConfig {
                timeout: parse_or(&lookup, "VALIDATION_TIMEOUT", defaults.validation.timeout)
                    .context("Invalid validation timeout")?,
            },
            request: RequestConfig {
                max_request_size: parse_or(&lookup, "MAX_REQUEST_SIZE", defaults.request.max_request_size)
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: text("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                cors_enabled: parse_or(&lookup, "CORS_ENABLED", defaults.security.cors_enabled)
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: text("RUST_LOG", &defaults.logging.level),
                format: text("LOG_FORMAT", &defaults.logging.format),
            },
            prompt: PromptSettings {
                config_path: lookup("PROMPT_CONFIG").filter(|p| !p.trim().is_empty()),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        // Validate port range
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        // Validate URL format
        for (name, endpoint) in [("Anthropic", &self.anthropic), ("OpenAI", &self.openai)] {
            if !endpoint.base_url.starts_with("http") {
                anyhow::bail!("Invalid {} base URL format, should start with 'http'", name);
            }
            if endpoint.model.trim().is_empty() {
                anyhow::bail!("{} model cannot be empty", name);
            }
        }

        // Validate timeout values
        if self.generation.timeout == 0 || self.validation.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        if self.generation.max_tokens == 0 {
            anyhow::bail!("Generation token budget cannot be 0");
        }

        // Validate request size limit
        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        // Validate log level; filter directives such as `resume_tailor=debug` pass through
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) && !self.logging.level.contains('=') {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        // Validate log format
        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse a looked-up value, or return the default when the key is absent
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has invalid value '{}'", key, raw)),
        None => Ok(default),
    }
}
