//! Submission form: GET renders it, POST runs the tailoring pipeline.

use askama::Template;
use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    response::{Html, Redirect},
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::routes::pages::{Flash, IndexPage};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

/// Form fields of a submission. Either may be absent.
#[derive(Debug, Default)]
struct Submission {
    job_url: Option<String>,
    resume_pdf: Option<Bytes>,
}

/// GET /
pub async fn handle_index(Query(query): Query<IndexQuery>) -> Result<Html<String>, AppError> {
    let flash = query
        .error
        .as_deref()
        .and_then(Flash::from_code)
        .map(Flash::message);
    Ok(Html(IndexPage { flash }.render()?))
}

/// POST /
///
/// Always answers with a redirect: to the download page on success, back to
/// the form with a flash message on any failure.
pub async fn handle_submit(State(state): State<AppState>, multipart: Multipart) -> Redirect {
    let submission = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            warn!(status = %e.status(), "Submission rejected: unreadable form data: {e}");
            return Redirect::to(&Flash::Upload.redirect_target());
        }
    };

    let (Some(job_url), Some(resume_pdf)) = (submission.job_url, submission.resume_pdf) else {
        warn!("Submission rejected: missing job_url or resume_file");
        return Redirect::to(&Flash::MissingFields.redirect_target());
    };

    match state.pipeline.run(&job_url, resume_pdf).await {
        Ok(id) => Redirect::to(&format!("/download/{id}")),
        Err(e) => Redirect::to(&Flash::from(&e).redirect_target()),
    }
}

/// Reads `job_url` and `resume_file` out of the form. Blank URLs and file
/// inputs submitted without a file name count as missing. Truncated bodies and
/// uploads over the body limit surface as `MultipartError`.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, MultipartError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("job_url") => {
                let url = field.text().await?;
                let url = url.trim();
                if !url.is_empty() {
                    submission.job_url = Some(url.to_string());
                }
            }
            Some("resume_file") => {
                let has_name = field.file_name().is_some_and(|name| !name.is_empty());
                let bytes = field.bytes().await?;
                if has_name {
                    submission.resume_pdf = Some(bytes);
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}
