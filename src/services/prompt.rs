//! Prompt builder
//!
//! Renders the configured role template and appends the fixed output-format
//! instructions that the response parser depends on.

use super::parser::{INTERVIEW_HEADER, RESUME_HEADER};
use crate::config::PromptConfig;

/// Value used for `{job_posting_url}` when the caller has none
const NOT_PROVIDED: &str = "not provided";

/// Prompt builder
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    config: PromptConfig,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(PromptConfig::default())
    }
}

impl PromptBuilder {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    /// Role profile and template in use
    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Build the prompt for a profile URL and write-up
    pub fn build_prompt(&self, linkedin_url: &str, personal_writeup: &str) -> String {
        self.render(None, linkedin_url, personal_writeup)
    }

    /// Build the prompt, also filling `{job_posting_url}`
    pub fn render(&self, job_posting_url: Option<&str>, linkedin_url: &str, personal_writeup: &str) -> String {
        let role = &self.config.role;
        let emphasis = role.emphasis.join(", ");
        let sections = role.sections.join(", ");
        let job_posting_url = job_posting_url.filter(|u| !u.is_empty()).unwrap_or(NOT_PROVIDED);

        let values = [
            ("role_title", role.title.as_str()),
            ("role_description", role.description.as_str()),
            ("emphasis", emphasis.as_str()),
            ("sections", sections.as_str()),
            ("job_posting_url", job_posting_url),
            ("linkedin_url", linkedin_url),
            ("personal_writeup", personal_writeup),
        ];

        let mut prompt = render_template(&self.config.template, &values);
        prompt.push_str(&output_format_block());
        prompt
    }
}

/// Instructions fixing the two-header layout of the model output
pub fn output_format_block() -> String {
    format!(
        "\nPlease format your response as:\n\n{}\n[The complete tailored resume in markdown format]\n\n{}\n[List of interview questions and talking points I should prepare]\n",
        RESUME_HEADER, INTERVIEW_HEADER
    )
}

/// Substitute `{name}` tokens in a single pass
///
/// Unknown tokens are kept verbatim and substituted values are never scanned again.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleProfile;

    #[test]
    fn test_prompt_embeds_inputs_and_headers() {
        let prompt = PromptBuilder::default().build_prompt("https://linkedin.com/in/jane", "I build RAG systems.");

        assert!(prompt.contains("MY LINKEDIN PROFILE: https://linkedin.com/in/jane"));
        assert!(prompt.contains("I build RAG systems."));
        assert!(prompt.contains("LLM Engineer position at Torq"));

        let resume_at = prompt.find(RESUME_HEADER).unwrap();
        let interview_at = prompt.find(INTERVIEW_HEADER).unwrap();
        assert!(resume_at < interview_at);
    }

    #[test]
    fn test_render_fills_role_lists() {
        let prompt = PromptBuilder::default().render(Some("https://jobs.example/1"), "u", "w");
        assert!(prompt.contains("Summary, Skills, Experience, Education (if relevant)"));
        assert!(prompt.contains("JOB POSTING URL: https://jobs.example/1"));
        assert!(!prompt.contains("{role_title}"));
    }

    #[test]
    fn test_missing_job_url() {
        let prompt = PromptBuilder::default().build_prompt("u", "w");
        assert!(prompt.contains("JOB POSTING URL: not provided"));
    }

    #[test]
    fn test_user_text_is_not_rescanned() {
        let prompt = PromptBuilder::default().build_prompt("u", "my template uses {role_title} literally");
        assert!(prompt.contains("my template uses {role_title} literally"));
    }

    #[test]
    fn test_render_template_edge_cases() {
        let values = [("a", "1")];
        assert_eq!(render_template("{a}-{b}-{a}", &values), "1-{b}-1");
        assert_eq!(render_template("{{a}}", &values), "{1}");
        assert_eq!(render_template("open {a", &values), "open {a");
        assert_eq!(render_template("", &values), "");
    }

    #[test]
    fn test_custom_role() {
        let builder = PromptBuilder::new(PromptConfig {
            role: RoleProfile {
                title: "SRE".to_string(),
                description: String::new(),
                emphasis: vec![],
                sections: vec![],
            },
            template: "{role_title}: {linkedin_url} / {personal_writeup}".to_string(),
        });
        let prompt = builder.build_prompt("u", "w");
        assert!(prompt.starts_with("SRE: u / w\n"));
        assert!(prompt.contains(RESUME_HEADER));
    }
}
