use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::job_page::FetchError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown or expired artifact id. Rendered as the plain-text 404 the download routes promise.
    #[error("File not found.")]
    NotFound,

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound => {
                return (StatusCode::NOT_FOUND, "File not found.").into_response();
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_ERROR",
                    "A page rendering error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Terminal failure of one tailoring run. Every variant aborts the request;
/// there is no partial-success path.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("job description unavailable: {0}")]
    Fetch(#[from] FetchError),

    #[error("resume PDF yielded no text")]
    Extraction,

    #[error("resume rewrite produced no output")]
    Generation,

    #[error("PDF rendering failed: {0}")]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Stage name used in structured logs.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch_job_description",
            PipelineError::Extraction => "extract_resume_text",
            PipelineError::Generation => "generate_resume",
            PipelineError::Render(_) => "render_pdf",
        }
    }
}
