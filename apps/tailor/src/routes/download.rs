//! Download routes for a stored artifact bundle.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::pages::DownloadPage;
use crate::state::AppState;
use crate::store::ArtifactBundle;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// GET /download/:id
pub async fn handle_download_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let (id, bundle) = lookup(&state, "/download/:id", &id)?;
    let page = DownloadPage {
        file_id: id.to_string(),
        match_score: bundle.match_score,
        revised_resume: &bundle.revised_resume,
    };
    Ok(Html(page.render()?))
}

/// GET /download/html/:id
///
/// The rendered page the PDF was produced from, served inline.
pub async fn handle_download_html(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let (_, bundle) = lookup(&state, "/download/html/:id", &id)?;
    Ok(Html(bundle.resume_html.clone()))
}

/// GET /download/pdf/:id
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (_, bundle) = lookup(&state, "/download/pdf/:id", &id)?;
    Ok(attachment(bundle.pdf.clone(), PDF_MIME, "Tailored_Resume.pdf"))
}

/// GET /download/docx/:id
pub async fn handle_download_docx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (_, bundle) = lookup(&state, "/download/docx/:id", &id)?;
    Ok(attachment(bundle.docx.clone(), DOCX_MIME, "Tailored_Resume.docx"))
}

/// Ids that do not parse are as unknown as ids never issued.
fn lookup(
    state: &AppState,
    route: &'static str,
    raw_id: &str,
) -> Result<(Uuid, Arc<ArtifactBundle>), AppError> {
    let bundle = Uuid::parse_str(raw_id)
        .ok()
        .and_then(|id| state.store.get(&id).map(|bundle| (id, bundle)));

    bundle.ok_or_else(|| {
        warn!(route, id = raw_id, "Artifact not found (unknown, expired or malformed id)");
        AppError::NotFound
    })
}

fn attachment(body: Bytes, mime: &'static str, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
