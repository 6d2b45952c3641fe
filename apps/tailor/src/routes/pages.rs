//! Server-rendered pages: the submission form and the download page.

use askama::Template;

use crate::errors::PipelineError;
use crate::scoring::MatchScore;

/// One-shot message shown on the form after a failed submission.
/// Carried across the redirect as `/?error=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    MissingFields,
    Upload,
    JobDescription,
    ResumeText,
    Generation,
    Pdf,
}

impl Flash {
    const ALL: [Flash; 6] = [
        Flash::MissingFields,
        Flash::Upload,
        Flash::JobDescription,
        Flash::ResumeText,
        Flash::Generation,
        Flash::Pdf,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Flash::MissingFields => "missing_fields",
            Flash::Upload => "upload",
            Flash::JobDescription => "job_description",
            Flash::ResumeText => "resume_text",
            Flash::Generation => "generation",
            Flash::Pdf => "pdf",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::MissingFields => "Please provide both a job description URL and a resume PDF.",
            Flash::Upload => "The upload could not be read. Please try again with a smaller PDF.",
            Flash::JobDescription => "Failed to extract job description from the provided URL.",
            Flash::ResumeText => "Failed to extract text from the uploaded resume.",
            Flash::Generation => "Failed to generate a revised resume.",
            Flash::Pdf => "Failed to generate PDF file.",
        }
    }

    /// Location of the form with this message attached.
    pub fn redirect_target(self) -> String {
        format!("/?error={}", self.code())
    }
}

impl From<&PipelineError> for Flash {
    fn from(error: &PipelineError) -> Self {
        match error {
            PipelineError::Fetch(_) => Flash::JobDescription,
            PipelineError::Extraction => Flash::ResumeText,
            PipelineError::Generation => Flash::Generation,
            PipelineError::Render(_) => Flash::Pdf,
        }
    }
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Resume Tailor</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px auto; max-width: 640px; }
        .flash { background: #fdecea; color: #611a15; padding: 10px 14px; border-radius: 4px; }
        label { display: block; margin-top: 18px; font-weight: bold; }
        input[type=url] { width: 100%; padding: 6px; }
        button { margin-top: 24px; padding: 8px 18px; }
    </style>
</head>
<body>
    <h1>Resume Tailor</h1>
    {% if let Some(message) = flash %}
    <p class="flash">{{ message }}</p>
    {% endif %}
    <form method="post" action="/" enctype="multipart/form-data">
        <label for="job_url">Job description URL</label>
        <input type="url" id="job_url" name="job_url" placeholder="https://..." required>
        <label for="resume_file">Resume (PDF)</label>
        <input type="file" id="resume_file" name="resume_file" accept="application/pdf" required>
        <button type="submit">Tailor my resume</button>
    </form>
</body>
</html>"#
)]
pub struct IndexPage {
    pub flash: Option<&'static str>,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Tailored Resume</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px auto; max-width: 640px; }
        .score { font-size: 20px; }
        a { display: inline-block; margin-right: 16px; }
        pre { white-space: pre-wrap; background: #f6f6f6; padding: 16px; }
    </style>
</head>
<body>
    <h1>Your tailored resume is ready</h1>
    <p class="score">Match Score: {{ match_score }}%</p>
    <p>
        <a href="/download/pdf/{{ file_id }}">Download PDF</a>
        <a href="/download/docx/{{ file_id }}">Download DOCX</a>
        <a href="/download/html/{{ file_id }}">View as web page</a>
    </p>
    <p><a href="/">Tailor another resume</a></p>
    <h2>Preview</h2>
    <pre>{{ revised_resume }}</pre>
</body>
</html>"#
)]
pub struct DownloadPage<'a> {
    pub file_id: String,
    pub match_score: MatchScore,
    pub revised_resume: &'a str,
}
