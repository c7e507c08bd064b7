//! Cleaning of raw model output into a JSON object.
//!
//! Models wrap JSON in markdown fences or surround it with chatter even when
//! told not to. Cleaning removes every fence marker, then keeps only the span
//! from the first `{` to the last `}`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json|```").expect("fence pattern is valid"));

/// Strips code fences and any non-JSON prefix/suffix. Returns an empty string
/// when no `{ ... }` span exists.
pub fn clean_json_response(raw: &str) -> String {
    let without_fences = FENCE_RE.replace_all(raw, "");

    let Some(start) = without_fences.find('{') else {
        return String::new();
    };
    let tail = &without_fences[start..];
    let Some(end) = tail.rfind('}') else {
        return String::new();
    };

    tail[..=end].trim().to_string()
}

/// Parses cleaned output. Only a top-level object satisfies the résumé contract.
pub fn parse_json_object(cleaned: &str) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_str::<Map<String, Value>>(cleaned)
}

/// First `max_chars` characters of `text`, for logs and error payloads.
pub fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
