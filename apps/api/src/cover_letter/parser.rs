//! Zone detection for the canonical cover-letter text.
//!
//! The letter carries no markup: zones are recovered line by line from position and
//! a couple of literal markers. The scan is a four-state machine
//! (`Name → Contact → Body → Footer`) driven by the pure reducer [`step`].
//!
//! Hand-edited letters may break the expected shape. The scan never fails: when no
//! salutation is ever seen, everything after the name/contact header is moved into
//! the body once the input is exhausted.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::cover_letter::assembler::{EMAIL_LABEL, PHONE_LABEL};

lazy_static! {
    static ref SALUTATION_RE: Regex = Regex::new(r"(?i)^Dear Hiring Manager").expect("valid salutation pattern");
    static ref CLOSING_RE: Regex = Regex::new(r"(?i)^Sincerely[,.]?$").expect("valid closing pattern");
}

/// Labels that mark a header line as contact information.
const CONTACT_LABELS: &[&str] = &[EMAIL_LABEL, PHONE_LABEL];

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Name,
    Contact,
    Body,
    Footer,
}

/// What a single (trimmed) line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Name,
    Contact,
    /// Free header line between contact block and salutation (date, company).
    PreDate,
    Body,
    Footer,
}

/// Pure transition function: given the current zone and a trimmed line, returns the
/// next zone and the line's classification.
pub fn step(zone: Zone, line: &str) -> (Zone, LineKind) {
    match zone {
        Zone::Name if line.is_empty() => (Zone::Name, LineKind::Blank),
        Zone::Name => (Zone::Contact, LineKind::Name),
        Zone::Contact if SALUTATION_RE.is_match(line) => (Zone::Body, LineKind::Body),
        Zone::Contact if line.is_empty() => (Zone::Contact, LineKind::Blank),
        Zone::Contact if is_contact_line(line) => (Zone::Contact, LineKind::Contact),
        Zone::Contact => (Zone::Contact, LineKind::PreDate),
        Zone::Body if CLOSING_RE.is_match(line) => (Zone::Footer, LineKind::Footer),
        Zone::Body if line.is_empty() => (Zone::Body, LineKind::Blank),
        Zone::Body => (Zone::Body, LineKind::Body),
        Zone::Footer if line.is_empty() => (Zone::Footer, LineKind::Blank),
        Zone::Footer => (Zone::Footer, LineKind::Footer),
    }
}

fn is_contact_line(line: &str) -> bool {
    CONTACT_LABELS.iter().any(|label| line.starts_with(label))
}

/// A trimmed line together with the zone it was assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub zone: Zone,
    pub kind: LineKind,
    pub text: &'a str,
}

/// Runs the scanner over every line of `text`. Every input line yields exactly one
/// classified line, in order.
pub fn classify_lines(text: &str) -> Vec<ClassifiedLine<'_>> {
    let mut zone = Zone::Name;
    let mut lines: Vec<ClassifiedLine<'_>> = text
        .split('\n')
        .map(|raw| {
            let trimmed = raw.trim();
            let (next, kind) = step(zone, trimmed);
            let line = ClassifiedLine {
                zone: match kind {
                    LineKind::Name => Zone::Name,
                    LineKind::Blank => zone,
                    _ => next,
                },
                kind,
                text: trimmed,
            };
            zone = next;
            line
        })
        .collect();

    if zone == Zone::Contact {
        fall_through_to_body(&mut lines);
    }

    lines
}

/// No salutation was found: from the first line that is not part of the
/// name/contact header onwards, everything belongs to the body.
fn fall_through_to_body(lines: &mut [ClassifiedLine<'_>]) {
    let Some(start) = lines.iter().position(|l| l.kind == LineKind::PreDate) else {
        return;
    };

    for line in &mut lines[start..] {
        line.zone = Zone::Body;
        if line.kind != LineKind::Blank {
            line.kind = LineKind::Body;
        }
    }
}

/// Structured view of a letter, as consumed by the HTML renderer and the parse API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedLetter {
    pub name: String,
    pub contact: Vec<String>,
    pub pre_date: Vec<String>,
    /// Blank-line separated blocks; lines inside a block are joined with `\n`.
    pub body: Vec<String>,
    pub footer: Vec<String>,
}

/// Parses the letter into its zones. Total over all inputs.
pub fn parse_letter(text: &str) -> ParsedLetter {
    let mut parsed = ParsedLetter::default();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in classify_lines(text) {
        match (line.zone, line.kind) {
            (_, LineKind::Name) => parsed.name = line.text.to_string(),
            (_, LineKind::Contact) => parsed.contact.push(line.text.to_string()),
            (_, LineKind::PreDate) => parsed.pre_date.push(line.text.to_string()),
            (_, LineKind::Body) => paragraph.push(line.text),
            (Zone::Body, LineKind::Blank) => flush_paragraph(&mut paragraph, &mut parsed.body),
            (_, LineKind::Footer) => parsed.footer.push(line.text.to_string()),
            (_, LineKind::Blank) => {}
        }
    }
    flush_paragraph(&mut paragraph, &mut parsed.body);

    parsed
}

fn flush_paragraph(paragraph: &mut Vec<&str>, body: &mut Vec<String>) {
    if !paragraph.is_empty() {
        body.push(paragraph.join("\n"));
        paragraph.clear();
    }
}
