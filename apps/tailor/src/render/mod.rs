// Artifact rendering: the tailored resume as an HTML page, a PDF and a DOCX.
// HTML is the source of truth for the PDF; DOCX is built straight from the text.

pub mod docx;
pub mod html;
pub mod pdf;

use thiserror::Error;

pub use docx::generate_docx;
pub use html::render_resume_html;
pub use pdf::generate_pdf;

/// Title shared by every artifact.
pub const RESUME_TITLE: &str = "Tailored Resume";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTML template error: {0}")]
    Template(#[from] askama::Error),

    #[error("PDF writer error: {0}")]
    Pdf(String),

    #[error("DOCX writer error: {0}")]
    Docx(String),

    #[error("document has no renderable text")]
    EmptyDocument,

    #[error("renderer task aborted: {0}")]
    Aborted(String),
}
