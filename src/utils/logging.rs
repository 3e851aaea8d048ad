//! Logging utilities
//!
//! Helpers that keep secrets and long model text out of log output

/// Number of trailing characters of a credential that may appear in logs
const VISIBLE_SUFFIX: usize = 4;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    let total = s.chars().count();
    if total > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, total - max_len)
    } else {
        s.to_string()
    }
}

/// Render a credential for logs: vendor prefix plus the last four characters
///
/// Credentials too short to hide anything are fully masked.
pub fn redact_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.is_empty() {
        return "<empty>".to_string();
    }
    if chars.len() <= VISIBLE_SUFFIX * 3 {
        return "***".to_string();
    }

    let prefix: String = if credential.starts_with("sk-ant-") {
        "sk-ant-".to_string()
    } else if credential.starts_with("sk-") {
        "sk-".to_string()
    } else {
        String::new()
    };
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();

    format!("{}***{}", prefix, suffix)
}
