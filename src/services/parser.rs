//! Model output parser
//!
//! Splits the model's single text blob into the tailored resume and the
//! interview preparation notes. Marker formats are tried in order as data;
//! supporting another header style means adding a [`MarkerPair`].

use thiserror::Error;

/// Header the model is asked to put before the resume
pub const RESUME_HEADER: &str = "## TAILORED RESUME";

/// Header the model is asked to put before the interview notes
pub const INTERVIEW_HEADER: &str = "## INTERVIEW PREPARATION";

/// One recognised output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerPair {
    /// Marker separating resume from interview notes; must occur exactly once
    pub split: &'static str,
    /// Resume headers removed from the first part, longest first
    pub strip: &'static [&'static str],
}

/// Formats tried in order, first match wins
pub const DEFAULT_MARKERS: &[MarkerPair] = &[
    MarkerPair {
        split: INTERVIEW_HEADER,
        strip: &[RESUME_HEADER],
    },
    MarkerPair {
        split: "# INTERVIEW PREPARATION",
        strip: &[RESUME_HEADER, "# TAILORED RESUME"],
    },
];

/// The two sections split out of model output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSections {
    pub resume: String,
    pub interview: String,
}

impl ParsedSections {
    /// Render back into the canonical two-header layout
    pub fn to_markdown(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}",
            RESUME_HEADER, self.resume, INTERVIEW_HEADER, self.interview
        )
    }
}

/// No marker format matched the model output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("model output did not contain a recognised section marker")]
pub struct ParseIncomplete;

/// Response parser
#[derive(Debug, Clone)]
pub struct ResponseParser {
    markers: Vec<MarkerPair>,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::with_markers(DEFAULT_MARKERS.to_vec())
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser trying the given formats in order
    pub fn with_markers(markers: Vec<MarkerPair>) -> Self {
        Self { markers }
    }

    /// Split raw model output into resume and interview sections
    pub fn parse(&self, raw: &str) -> Result<ParsedSections, ParseIncomplete> {
        self.markers
            .iter()
            .find_map(|pair| split_once_exactly(raw, pair))
            .ok_or(ParseIncomplete)
    }
}

fn split_once_exactly(raw: &str, pair: &MarkerPair) -> Option<ParsedSections> {
    let mut parts = raw.split(pair.split);
    let (head, tail) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let resume = pair
        .strip
        .iter()
        .fold(head.to_string(), |text, header| text.replace(header, ""));

    Some(ParsedSections {
        resume: resume.trim().to_string(),
        interview: tail.trim().to_string(),
    })
}
