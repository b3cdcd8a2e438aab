//! DOCX export of a cover letter.
//!
//! Each input line becomes one paragraph. Styling is decided purely by the line's
//! classification from the zone scanner, so the mapping can be tested without
//! unpacking the generated archive.

use std::borrow::Cow;
use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, LineSpacing, PageMargin, Paragraph, Run, RunFonts};
use thiserror::Error;
use tracing::debug;

use crate::cover_letter::parser::{classify_lines, LineKind, Zone};

const FONT: &str = "Calibri";
const MUTED_COLOR: &str = "555555";

/// Twips per inch.
const TWIPS_PER_INCH: i32 = 1440;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("DOCX serialization failed: {0}")]
    Docx(String),
}

/// Paragraph formatting for one letter line. Sizes are in half-points, spacing in
/// twips. `relaxed` selects 1.15 line spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub size: usize,
    pub bold: bool,
    pub color: Option<&'static str>,
    pub justified: bool,
    pub after_twips: u32,
    pub relaxed: bool,
}

impl LineStyle {
    const fn spacer(after_twips: u32) -> Self {
        Self {
            size: 24,
            bold: false,
            color: None,
            justified: false,
            after_twips,
            relaxed: false,
        }
    }
}

/// Maps a classified line to its paragraph style.
pub fn line_style(zone: Zone, kind: LineKind) -> LineStyle {
    match (zone, kind) {
        (Zone::Name, LineKind::Blank) => LineStyle::spacer(40),
        (Zone::Contact, LineKind::Blank) => LineStyle::spacer(80),
        (Zone::Body, LineKind::Blank) => LineStyle::spacer(80),
        (Zone::Footer, LineKind::Blank) => LineStyle::spacer(60),
        (_, LineKind::Name) => LineStyle {
            size: 36,
            bold: true,
            color: None,
            justified: false,
            after_twips: 60,
            relaxed: false,
        },
        (_, LineKind::Contact) | (_, LineKind::PreDate) => LineStyle {
            size: 22,
            bold: false,
            color: Some(MUTED_COLOR),
            justified: false,
            after_twips: 60,
            relaxed: false,
        },
        (_, LineKind::Body) => LineStyle {
            size: 24,
            bold: false,
            color: None,
            justified: true,
            after_twips: 100,
            relaxed: true,
        },
        (_, LineKind::Footer) => LineStyle {
            size: 24,
            bold: false,
            color: None,
            justified: false,
            after_twips: 80,
            relaxed: false,
        },
    }
}

fn build_paragraph(text: &str, style: LineStyle) -> Paragraph {
    let mut spacing = LineSpacing::new().after(style.after_twips);
    if style.relaxed {
        // 240 twips is single spacing
        spacing = spacing.line(276);
    }

    let mut paragraph = Paragraph::new().line_spacing(spacing);
    if style.justified {
        paragraph = paragraph.align(AlignmentType::Both);
    }
    let text = xml_text(text);
    if text.is_empty() {
        return paragraph;
    }

    let mut run = Run::new()
        .add_text(text.as_ref())
        .size(style.size)
        .fonts(RunFonts::new().ascii(FONT).hi_ansi(FONT).cs(FONT));
    if style.bold {
        run = run.bold();
    }
    if let Some(color) = style.color {
        run = run.color(color);
    }

    paragraph.add_run(run)
}

/// The XML 1.0 `Char` production. Escaping does not help for anything outside it.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn xml_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

/// Serializes the letter as a `.docx` archive. Any input, including the empty
/// string, yields an openable document.
pub fn render_docx(text: &str) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(TWIPS_PER_INCH)
                .bottom(TWIPS_PER_INCH)
                .left(TWIPS_PER_INCH * 5 / 4)
                .right(TWIPS_PER_INCH * 5 / 4),
        )
        .default_fonts(RunFonts::new().ascii(FONT).hi_ansi(FONT).cs(FONT))
        .default_size(24);

    let lines = classify_lines(text);
    let paragraph_count = lines.len();
    for line in lines {
        docx = docx.add_paragraph(build_paragraph(line.text, line_style(line.zone, line.kind)));
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Docx(e.to_string()))?;

    let bytes = buffer.into_inner();
    debug!(
        "Rendered cover letter DOCX: {} paragraphs, {} bytes",
        paragraph_count,
        bytes.len()
    );
    Ok(bytes)
}
