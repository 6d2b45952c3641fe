//! HTML rendering of the tailored resume. Resume text is untrusted model output
//! and is HTML-escaped by askama before it lands in the page.

use askama::Template;

use crate::render::RESUME_TITLE;
use crate::scoring::MatchScore;

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<html>
<head>
    <meta charset="utf-8">
    <title>{{ title }}</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 40px;
        }
        h1 {
            text-align: center;
        }
        .match-score {
            font-size: 14px;
            color: #555;
            text-align: center;
        }
        .content {
            margin-top: 30px;
            white-space: pre-wrap;
        }
    </style>
</head>
<body>
    <h1>{{ title }}</h1>
    <p class="match-score">Match Score: {{ match_score }}%</p>
    <div class="content">{{ resume_text }}</div>
</body>
</html>"#
)]
struct ResumeHtml<'a> {
    title: &'a str,
    match_score: MatchScore,
    resume_text: &'a str,
}

/// Self-contained HTML page with the score and the resume as preformatted text.
pub fn render_resume_html(
    resume_text: &str,
    match_score: MatchScore,
) -> Result<String, askama::Error> {
    ResumeHtml {
        title: RESUME_TITLE,
        match_score,
        resume_text,
    }
    .render()
}
