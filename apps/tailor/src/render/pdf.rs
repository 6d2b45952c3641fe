//! HTML → PDF rendering.
//!
//! Understands the resume page produced by `render::html`: the `<h1>` title,
//! the `.match-score` line and the preformatted `.content` block. Pages without
//! those parts fall back to the body text. Output is A4 with Helvetica, lines
//! wrapped to the text column and spilled onto as many pages as needed.

use once_cell::sync::Lazy;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use scraper::{ElementRef, Html, Selector};

use crate::render::{RenderError, RESUME_TITLE};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static SCORE: Lazy<Selector> = Lazy::new(|| Selector::parse(".match-score").unwrap());
static CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse(".content").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;

const TITLE_PT: f32 = 18.0;
const SCORE_PT: f32 = 10.0;
const BODY_PT: f32 = 10.0;

/// Baseline-to-baseline distance for body text.
const LINE_HEIGHT: f32 = 5.0;
/// Characters per wrapped body line; Helvetica averages about half an em per glyph.
const WRAP_COLUMNS: usize = 92;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LineStyle {
    Title,
    Score,
    Body,
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    style: LineStyle,
    text: String,
}

/// Renders `html` to PDF bytes.
pub fn generate_pdf(html: &str) -> Result<Vec<u8>, RenderError> {
    let lines = layout_lines(html);
    if lines.iter().all(|l| l.text.trim().is_empty()) {
        return Err(RenderError::EmptyDocument);
    }
    paint(&lines)
}

/// Flattens the resume page into styled, wrapped lines in reading order.
fn layout_lines(html: &str) -> Vec<Line> {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    let title = first_text(&document, &TITLE);
    let score = first_text(&document, &SCORE);
    let content = document.select(&CONTENT).next().map(element_text);

    let Some(content) = content else {
        let body = document
            .select(&BODY)
            .next()
            .map(element_text)
            .unwrap_or_else(|| document.root_element().text().collect());
        push_body(&mut lines, &body);
        return lines;
    };

    lines.push(Line {
        style: LineStyle::Title,
        text: title.unwrap_or_else(|| RESUME_TITLE.to_string()),
    });
    if let Some(score) = score {
        lines.push(Line {
            style: LineStyle::Score,
            text: score,
        });
    }
    push_body(&mut lines, &content);
    lines
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|e| element_text(e).trim().to_string())
        .filter(|t| !t.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn push_body(lines: &mut Vec<Line>, text: &str) {
    for raw in text.trim_matches('\n').lines() {
        for wrapped in wrap_line(&sanitize(raw), WRAP_COLUMNS) {
            lines.push(Line {
                style: LineStyle::Body,
                text: wrapped,
            });
        }
    }
}

/// Builtin PDF fonts only cover Latin-1; anything else becomes `?`.
fn sanitize(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\t' => ' ',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Wraps at whitespace so no line exceeds `columns` characters; words longer
/// than a line are split hard. Leading indentation is kept on the first line.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    if line.chars().count() <= columns {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let indent: String = line
        .chars()
        .take_while(|c| *c == ' ')
        .take(columns / 4)
        .collect();
    let mut current = indent;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        let current_len = current.chars().count();
        let needs_space = current_len > 0 && !current.ends_with(' ');
        let extra = word.len() + usize::from(needs_space);

        if current_len + extra > columns && !current.trim().is_empty() {
            out.push(std::mem::take(&mut current));
        } else if needs_space {
            current.push(' ');
        }

        while current.chars().count() + word.len() > columns {
            let room = columns - current.chars().count();
            current.extend(word.drain(..room));
            out.push(std::mem::take(&mut current));
        }
        current.extend(word);
    }

    if !current.trim().is_empty() {
        out.push(current);
    }
    out
}

fn paint(lines: &[Line]) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(RESUME_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut layer: PdfLayerReference = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        let (size, advance, font): (f32, f32, &IndirectFontRef) = match line.style {
            LineStyle::Title => (TITLE_PT, 10.0, &bold),
            LineStyle::Score => (SCORE_PT, 10.0, &regular),
            LineStyle::Body => (BODY_PT, LINE_HEIGHT, &regular),
        };

        if y - advance < MARGIN {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= advance;

        if !line.text.trim().is_empty() {
            layer.use_text(line.text.clone(), size, Mm(x_for(line)), Mm(y), font);
        }
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Title and score are centred by estimate; body text starts at the margin.
fn x_for(line: &Line) -> f32 {
    match line.style {
        LineStyle::Body => MARGIN,
        LineStyle::Title | LineStyle::Score => {
            let size = if line.style == LineStyle::Title { TITLE_PT } else { SCORE_PT };
            // 0.5 em per glyph, 1pt = 0.3528mm
            let width = line.text.chars().count() as f32 * size * 0.5 * 0.3528;
            ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
        }
    }
}
