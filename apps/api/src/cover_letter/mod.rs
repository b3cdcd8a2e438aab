// Cover letters: assembly of the canonical plain text, zone parsing, and the
// HTML / DOCX renderings derived from it. The plain text is the source of truth;
// every rendering is recomputed from it on demand.

pub mod assembler;
pub mod docx;
pub mod handlers;
pub mod html;
pub mod parser;
