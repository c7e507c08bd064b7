//! Résumé text extraction from uploaded documents.
//!
//! Dispatches on MIME type to a format-specific extractor, then
//! [`validation::validate_resume_text`] decides whether the text looks like a résumé.

pub mod docx;
pub mod pdf;
pub mod validation;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

pub use validation::validate_resume_text;

/// Upload size cap for résumé files.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TXT: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to extract text: Unsupported file type. Upload PDF, DOCX, or TXT.")]
    UnsupportedType(String),

    #[error("Failed to extract text: PDF contains no extractable text. It may be image-based - try a DOCX instead.")]
    EmptyPdf,

    #[error("Failed to extract text: DOCX contains no extractable text")]
    EmptyDocx,

    #[error("Failed to extract text: TXT file is empty")]
    EmptyTxt,

    #[error("Failed to extract text: {0}")]
    Unreadable(String),

    #[error("Resume content too short. Please upload a complete resume.")]
    TooShort,

    #[error("Resume does not appear to contain valid information.")]
    NoIdentity,
}

/// A single file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Txt,
}

impl ResumeFormat {
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_PDF => Some(ResumeFormat::Pdf),
            MIME_DOCX => Some(ResumeFormat::Docx),
            MIME_TXT => Some(ResumeFormat::Txt),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "PDF",
            ResumeFormat::Docx => "DOCX",
            ResumeFormat::Txt => "TXT",
        }
    }
}

/// Extracts plain text from `file`. PDF parsing runs on the blocking pool.
pub async fn extract_text(file: &UploadedFile) -> Result<String, ExtractionError> {
    let format = ResumeFormat::from_mime(&file.content_type)
        .ok_or_else(|| ExtractionError::UnsupportedType(file.content_type.clone()))?;

    info!("Extracting text from {}...", format.label());

    let text = match format {
        ResumeFormat::Pdf => {
            let bytes = file.bytes.clone();
            let text = tokio::task::spawn_blocking(move || pdf::extract_pdf_text(&bytes))
                .await
                .map_err(|e| ExtractionError::Unreadable(format!("PDF worker failed: {e}")))??;
            if text.trim().is_empty() {
                return Err(ExtractionError::EmptyPdf);
            }
            text
        }
        ResumeFormat::Docx => {
            let text = docx::extract_docx_text(&file.bytes)?;
            if text.trim().is_empty() {
                return Err(ExtractionError::EmptyDocx);
            }
            text
        }
        ResumeFormat::Txt => {
            let text = String::from_utf8_lossy(&file.bytes).into_owned();
            if text.trim().is_empty() {
                return Err(ExtractionError::EmptyTxt);
            }
            text
        }
    };

    info!("Extracted {} characters from {}", text.chars().count(), file.file_name);
    Ok(text)
}
