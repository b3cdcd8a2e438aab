//! Cover Letter Assembler: builds the canonical plain-text letter.
//!
//! Line layout (one entry per `\n`-separated slot):
//! name, blank, contact block, blank, date, blank, company, blank,
//! salutation, blank, body, blank, closing, name.
//! The contact slot is kept as an empty line when there is no contact info so the
//! remaining zones stay where the parser expects them.

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

pub const SALUTATION: &str = "Dear Hiring Manager,";
pub const CLOSING: &str = "Sincerely,";
pub const EMAIL_LABEL: &str = "Email:";
pub const PHONE_LABEL: &str = "Phone:";

/// Used for both the header and the signature when no name is supplied.
const FALLBACK_NAME: &str = "Applicant";

/// Identity fields plus the AI-written body. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoverLetterParts {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub body: String,
}

/// Assembles the letter, dated with today's local date.
pub fn assemble_cover_letter(parts: &CoverLetterParts) -> String {
    assemble_dated(parts, Local::now().date_naive())
}

/// `October 19, 2026` style: full month name, unpadded day, four-digit year.
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub(crate) fn assemble_dated(parts: &CoverLetterParts, date: NaiveDate) -> String {
    let name = if parts.name.trim().is_empty() {
        FALLBACK_NAME
    } else {
        parts.name.trim()
    };

    let mut contact_lines = Vec::new();
    if !parts.email.is_empty() {
        contact_lines.push(format!("{EMAIL_LABEL} {}", parts.email));
    }
    if !parts.phone.is_empty() {
        contact_lines.push(format!("{PHONE_LABEL} {}", parts.phone));
    }
    let contact = contact_lines.join("\n");
    let date = format_letter_date(date);

    let letter = [
        name,
        "",
        contact.as_str(),
        "",
        date.as_str(),
        "",
        parts.company.as_str(),
        "",
        SALUTATION,
        "",
        parts.body.trim(),
        "",
        CLOSING,
        name,
    ]
    .join("\n");

    debug!("Assembled cover letter: {} bytes", letter.len());
    letter
}
