//! DOCX rendering: a title, the match score, then one paragraph per non-blank
//! resume line. Blank lines are dropped rather than kept as spacing.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use crate::render::{RenderError, RESUME_TITLE};
use crate::scoring::MatchScore;

const TITLE_STYLE: &str = "Title";

/// Builds the `.docx` package in memory.
pub fn generate_docx(resume_text: &str, match_score: MatchScore) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name(TITLE_STYLE)
                .size(56)
                .bold(),
        )
        .add_paragraph(
            Paragraph::new()
                .style(TITLE_STYLE)
                .add_run(Run::new().add_text(RESUME_TITLE)),
        );

    for text in body_paragraphs(resume_text, match_score) {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Paragraph texts following the title: the score line, then each trimmed
/// non-blank resume line.
fn body_paragraphs(resume_text: &str, match_score: MatchScore) -> Vec<String> {
    std::iter::once(format!("Match Score: {match_score}%"))
        .chain(
            resume_text
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        )
        .collect()
}
