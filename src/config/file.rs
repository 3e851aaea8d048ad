//! File-based prompt configuration
//!
//! Loads the target role profile and the prompt template from a JSON or TOML
//! file, falling back to the built-in LLM Engineer profile

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Placeholders every template must contain
pub const REQUIRED_PLACEHOLDERS: &[&str] = &["{linkedin_url}", "{personal_writeup}"];

/// File name stem searched in the default locations
const CONFIG_STEM: &str = "prompt";
const LOCAL_CONFIG_STEM: &str = "resume-tailor";
const EXTENSIONS: &[&str] = &["json", "toml"];

/// The job the resume is tailored for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    /// Job title, e.g. "LLM Engineer"
    pub title: String,
    /// Free text describing the role and employer
    #[serde(default)]
    pub description: String,
    /// Skills the resume should emphasize
    #[serde(default)]
    pub emphasis: Vec<String>,
    /// Resume sections to produce, in order
    #[serde(default)]
    pub sections: Vec<String>,
}

/// Prompt configuration loaded from file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptConfig {
    pub role: RoleProfile,
    /// Instruction template with `{placeholder}` tokens
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

const DEFAULT_TEMPLATE: &str = "\
I need to create a tailored resume for an {role_title} job application. Please help me optimize my resume based on the following information:

JOB POSTING: {role_description}
JOB POSTING URL: {job_posting_url}

MY LINKEDIN PROFILE: {linkedin_url}

MY PERSONAL WRITEUP:
{personal_writeup}

I want you to:
1. Create a tailored resume that highlights the skills and experiences most relevant to this {role_title} position
2. Emphasize my experience with {emphasis}
3. Structure the resume with clear sections: {sections}
4. Also generate a list of potential interview questions I should prepare for this specific {role_title} role
";

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            role: RoleProfile {
                title: "LLM Engineer".to_string(),
                description: "This is for an LLM Engineer position at Torq. The job involves designing and \
                    developing Agent and LLM-based features, crafting high-quality prompts, building datasets \
                    and benchmarks for evaluating LLM applications, and staying current with state-of-the-art \
                    research. The role requires experience with LLM application concepts like RAG, embeddings, \
                    CoT prompting, and hands-on experience with developing datasets and benchmarks. They prefer \
                    someone with experience in LangGraph or similar frameworks, and someone who can quickly \
                    bring solutions into production."
                    .to_string(),
                emphasis: vec![
                    "pipelines for large language models".to_string(),
                    "generative AI".to_string(),
                    "containerized applications".to_string(),
                    "MLOps solutions".to_string(),
                ],
                sections: vec![
                    "Summary".to_string(),
                    "Skills".to_string(),
                    "Experience".to_string(),
                    "Education (if relevant)".to_string(),
                ],
            },
            template: default_template(),
        }
    }
}

impl PromptConfig {
    /// Load configuration from a JSON or TOML file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading prompt configuration from: {:?}", path);

        let source = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .with_context(|| format!("Failed to read prompt config file: {:?}", path))?;

        let prompt: PromptConfig = source
            .try_deserialize()
            .with_context(|| format!("Failed to parse prompt config file: {:?}", path))?;

        prompt.validate()?;

        debug!(role = %prompt.role.title, "Prompt configuration loaded");
        Ok(prompt)
    }

    /// Load configuration from an explicit path or the default locations
    ///
    /// Searches in order:
    /// 1. the explicit path, when given (must exist)
    /// 2. ~/.config/resume-tailor/prompt.{json,toml}
    /// 3. ./resume-tailor.{json,toml}
    ///
    /// Falls back to the built-in profile when nothing is found.
    pub fn load_or_default(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(Path::new(path));
        }

        match Self::default_locations().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load(&path),
            None => {
                info!("No prompt configuration file found, using built-in role profile");
                Ok(Self::default())
            }
        }
    }

    /// Candidate file paths, most specific first
    pub fn default_locations() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            let dir = home.join(".config").join("resume-tailor");
            paths.extend(EXTENSIONS.iter().map(|ext| dir.join(format!("{}.{}", CONFIG_STEM, ext))));
        }
        paths.extend(
            EXTENSIONS
                .iter()
                .map(|ext| PathBuf::from(format!("{}.{}", LOCAL_CONFIG_STEM, ext))),
        );
        paths
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.role.title.trim().is_empty() {
            anyhow::bail!("Prompt role title cannot be empty");
        }

        for placeholder in REQUIRED_PLACEHOLDERS {
            if !self.template.contains(placeholder) {
                anyhow::bail!("Prompt template must contain the {} placeholder", placeholder);
            }
        }

        Ok(())
    }
}
