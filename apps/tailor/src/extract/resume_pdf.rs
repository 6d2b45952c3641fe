//! Resume text extraction from an uploaded PDF.
//!
//! Decoding is CPU-bound and `pdf-extract` may panic on malformed input, so the
//! decode runs inside `tokio::task::spawn_blocking`; a panic surfaces as `None`.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;

/// Turns an uploaded resume into plain text.
///
/// `None` means the document could not be decoded at all. Callers must treat
/// `Some` text that is blank after trimming as the same failure.
#[async_trait]
pub trait ResumeExtractor: Send + Sync {
    async fn extract(&self, pdf: Bytes) -> Option<String>;
}

pub struct PdfResumeExtractor;

#[async_trait]
impl ResumeExtractor for PdfResumeExtractor {
    async fn extract(&self, pdf: Bytes) -> Option<String> {
        match tokio::task::spawn_blocking(move || extract_resume_text(&pdf)).await {
            Ok(text) => text,
            Err(e) => {
                warn!("PDF decoder aborted: {e}");
                None
            }
        }
    }
}

/// Decodes `pdf` page by page. Pages without text contribute nothing.
pub fn extract_resume_text(pdf: &[u8]) -> Option<String> {
    match pdf_extract::extract_text_from_mem_by_pages(pdf) {
        Ok(pages) => Some(join_page_texts(&pages)),
        Err(e) => {
            warn!("PDF decode failed: {e}");
            None
        }
    }
}

/// Concatenates page texts, each followed by a newline, skipping empty pages.
pub fn join_page_texts<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages.iter().map(AsRef::as_ref).filter(|p| !p.is_empty()) {
        text.push_str(page);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_skips_empty_pages() {
        assert_eq!(join_page_texts(&["a", "", "b"]), "a\nb\n");
    }

    #[test]
    fn test_join_of_no_pages_is_empty() {
        let pages: [&str; 0] = [];
        assert_eq!(join_page_texts(&pages), "");
    }

    #[test]
    fn test_garbage_bytes_are_not_a_pdf() {
        assert!(extract_resume_text(b"definitely not a pdf").is_none());
    }

    #[tokio::test]
    async fn test_extractor_reports_undecodable_upload_as_none() {
        let text = PdfResumeExtractor
            .extract(Bytes::from_static(b"%PDF-garbage"))
            .await;
        assert!(text.is_none());
    }
}
