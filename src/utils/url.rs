//! URL input cleanup

/// Clean a user-supplied URL
///
/// Surrounding whitespace and leading `@` characters (left over from
/// chat-style mentions such as `@https://...`) are removed. A missing value
/// becomes the empty string.
///
/// Every leading `@` goes, including one preceded or followed by whitespace,
/// so `" @https://a"` and `"@@https://a"` both give `"https://a"`. Removing a
/// single `@` and then trimming would leave `"@https://a"` for the first and
/// would not be idempotent. Applying this function twice gives the same result
/// as applying it once.
pub fn normalize_url(input: Option<&str>) -> String {
    match input {
        Some(raw) => raw
            .trim_start_matches(|c: char| c == '@' || c.is_whitespace())
            .trim_end()
            .to_string(),
        None => String::new(),
    }
}
