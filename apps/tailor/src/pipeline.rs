//! Tailoring pipeline: one job URL plus one resume PDF in, one stored artifact
//! bundle out.
//!
//! Flow: fetch job page → extract resume text → LLM rewrite → match score
//! (job vs rewritten resume) → HTML → DOCX + PDF → store.
//!
//! Every stage failure is terminal for the run and nothing is stored.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::extract::{extract_job_description, PageFetcher, ResumeExtractor};
use crate::render::{generate_docx, generate_pdf, render_resume_html, RenderError};
use crate::rewriter::{generate_resume, ResumeWriter};
use crate::scoring::{compute_match_score, MatchScore};
use crate::store::{ArtifactBundle, ArtifactStore};

/// The collaborators one run needs. Cheap to clone; carried in `AppState`.
#[derive(Clone)]
pub struct TailorPipeline {
    pub fetcher: Arc<dyn PageFetcher>,
    pub extractor: Arc<dyn ResumeExtractor>,
    pub writer: Arc<dyn ResumeWriter>,
    pub store: Arc<ArtifactStore>,
}

impl TailorPipeline {
    /// Runs every stage and returns the id the bundle was stored under.
    pub async fn run(&self, job_url: &str, resume_pdf: Bytes) -> Result<Uuid, PipelineError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("tailor_run", %request_id);

        let result = self.run_stages(job_url, resume_pdf).instrument(span).await;

        match &result {
            Ok(artifact_id) => info!(%request_id, %artifact_id, "Tailoring run stored artifacts"),
            Err(e) => error!(%request_id, stage = e.stage(), job_url, "Tailoring run failed: {e}"),
        }
        result
    }

    async fn run_stages(&self, job_url: &str, resume_pdf: Bytes) -> Result<Uuid, PipelineError> {
        let job_description = extract_job_description(self.fetcher.as_ref(), job_url).await?;
        info!("Job description extracted: {} chars", job_description.len());

        let resume_text = self
            .extractor
            .extract(resume_pdf)
            .await
            .filter(|text| !text.trim().is_empty())
            .ok_or(PipelineError::Extraction)?;
        info!("Resume text extracted: {} chars", resume_text.len());

        let revised_resume = generate_resume(self.writer.as_ref(), &resume_text, &job_description)
            .await
            .ok_or(PipelineError::Generation)?;

        let match_score = compute_match_score(&job_description, &revised_resume);
        info!(score = match_score.value(), "Match score computed");

        let bundle = tokio::task::spawn_blocking(move || render_bundle(revised_resume, match_score))
            .await
            .map_err(|e| RenderError::Aborted(e.to_string()))??;

        Ok(self.store.create(bundle))
    }
}

/// CPU-bound rendering of all three artifacts.
fn render_bundle(
    revised_resume: String,
    match_score: MatchScore,
) -> Result<ArtifactBundle, RenderError> {
    let resume_html = render_resume_html(&revised_resume, match_score)?;
    let docx = generate_docx(&revised_resume, match_score)?;
    let pdf = generate_pdf(&resume_html)?;

    Ok(ArtifactBundle {
        resume_html,
        pdf: Bytes::from(pdf),
        docx: Bytes::from(docx),
        match_score,
        revised_resume,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::extract::job_page::FetchError;
    use crate::llm_client::LlmError;

    pub struct StubFetcher(pub Result<&'static str, u16>);

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.0.map(str::to_string).map_err(FetchError::Status)
        }
    }

    pub struct StubExtractor(pub Option<&'static str>);

    #[async_trait]
    impl ResumeExtractor for StubExtractor {
        async fn extract(&self, _pdf: Bytes) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    pub struct StubWriter {
        pub reply: &'static str,
        pub calls: AtomicUsize,
    }

    impl StubWriter {
        pub fn new(reply: &'static str) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ResumeWriter for StubWriter {
        async fn rewrite(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    pub fn pipeline(
        page: Result<&'static str, u16>,
        resume: Option<&'static str>,
        writer: Arc<StubWriter>,
    ) -> TailorPipeline {
        TailorPipeline {
            fetcher: Arc::new(StubFetcher(page)),
            extractor: Arc::new(StubExtractor(resume)),
            writer,
            store: Arc::new(ArtifactStore::new(Duration::from_secs(60), 16)),
        }
    }

    #[tokio::test]
    async fn test_successful_run_stores_one_bundle() {
        let writer = Arc::new(StubWriter::new("Experienced Python developer"));
        let pipeline = pipeline(
            Ok("<html><body><p>Need Python and SQL</p></body></html>"),
            Some("Python dev"),
            writer.clone(),
        );

        let id = pipeline.run("https://jobs.example/1", Bytes::new()).await.unwrap();

        assert_eq!(pipeline.store.len(), 1);
        let bundle = pipeline.store.get(&id).unwrap();
        assert_eq!(bundle.match_score.value(), 25.0);
        assert_eq!(bundle.revised_resume, "Experienced Python developer");
        assert!(bundle.resume_html.contains("Match Score: 25.0%"));
        assert!(bundle.pdf.starts_with(b"%PDF"));
        assert!(bundle.docx.starts_with(b"PK"));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_stops_before_rewrite() {
        let writer = Arc::new(StubWriter::new("unused"));
        let pipeline = pipeline(Err(503), Some("resume"), writer.clone());

        let err = pipeline.run("https://jobs.example/1", Bytes::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(FetchError::Status(503))));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.store.len(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_resume_stops_before_rewrite() {
        let writer = Arc::new(StubWriter::new("unused"));
        let pipeline = pipeline(Ok("<p>Need Rust</p>"), None, writer.clone());

        let err = pipeline.run("https://jobs.example/1", Bytes::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Extraction));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_resume_text_is_extraction_failure() {
        let writer = Arc::new(StubWriter::new("unused"));
        let pipeline = pipeline(Ok("<p>Need Rust</p>"), Some(" \n\n "), writer.clone());

        let err = pipeline.run("https://jobs.example/1", Bytes::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Extraction));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.store.len(), 0);
    }

    #[tokio::test]
    async fn test_empty_completion_stores_nothing() {
        let writer = Arc::new(StubWriter::new(""));
        let pipeline = pipeline(Ok("<p>Need Rust</p>"), Some("Rust developer"), writer.clone());

        let err = pipeline.run("https://jobs.example/1", Bytes::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Generation));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.store.len(), 0);
    }
}
