// PDF export: renders adapted résumé JSON straight to PDF operators.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod canvas;
pub mod font_metrics;
pub mod template;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialisation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Renders résumé JSON to PDF bytes. Missing or mistyped fields are skipped.
pub fn render_resume_pdf(resume: &Value) -> Result<Vec<u8>, RenderError> {
    let mut canvas = canvas::PageCanvas::new();
    template::layout_resume(resume, &mut canvas);
    canvas.finish()
}

/// [`render_resume_pdf`] on the blocking pool.
pub async fn render_resume_pdf_blocking(resume: Value) -> Result<Vec<u8>, RenderError> {
    tokio::task::spawn_blocking(move || render_resume_pdf(&resume)).await?
}
