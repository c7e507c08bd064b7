use std::panic::{self, AssertUnwindSafe};

use super::ExtractionError;

/// Text of every page, separated by newlines and trimmed. Blocking.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed inputs.
    let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
        .map_err(|_| ExtractionError::Unreadable("PDF could not be parsed".to_string()))?;

    let text = result.map_err(|e| ExtractionError::Unreadable(e.to_string()))?;
    Ok(text.replace('\u{000C}', "\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_unreadable() {
        let err = extract_pdf_text(b"%PDF-1.4 truncated").unwrap_err();
        assert!(matches!(err, ExtractionError::Unreadable(_)));
    }
}
