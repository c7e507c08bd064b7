use std::sync::LazyLock;

use regex::Regex;

use super::ExtractionError;

/// Trimmed text must be strictly longer than this many characters.
const MIN_RESUME_CHARS: usize = 100;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+ [A-Z][a-z]+").expect("name pattern is valid"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("email pattern is valid")
});

/// Accepts text that is long enough and contains a name-like or email-like token.
pub fn validate_resume_text(text: &str) -> Result<(), ExtractionError> {
    if text.trim().chars().count() <= MIN_RESUME_CHARS {
        return Err(ExtractionError::TooShort);
    }
    if !NAME_RE.is_match(text) && !EMAIL_RE.is_match(text) {
        return Err(ExtractionError::NoIdentity);
    }
    Ok(())
}

pub(crate) fn looks_like_email(text: &str) -> bool {
    EMAIL_RE
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}
