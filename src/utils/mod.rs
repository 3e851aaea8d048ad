//! Utilities module
//!
//! Contains error handling, log redaction and URL cleanup

pub mod error;
pub mod logging;
pub mod url;
