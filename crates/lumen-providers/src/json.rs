//! Cleaning and parsing of structured model responses.
//!
//! Models asked for JSON routinely wrap it in Markdown code fences. The
//! helpers here strip those wrappers before handing the text to serde.

use lumen_core::{Error, Result};
use serde::de::DeserializeOwned;

/// Strips a leading/trailing triple-backtick code fence from `raw`,
/// including an optional `json` language tag.
///
/// Text without fences is returned trimmed but otherwise untouched.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses a model response as JSON after stripping code fences.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] when the stripped text is not
/// valid JSON for the expected shape.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned)
        .map_err(|err| Error::MalformedResponse(format!("{err}: {cleaned:.120}")))
}
