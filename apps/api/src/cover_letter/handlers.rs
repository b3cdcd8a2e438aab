//! Axum route handlers for the Cover Letter API.

use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::cover_letter::assembler::{assemble_cover_letter, CoverLetterParts};
use crate::cover_letter::docx::render_docx;
use crate::cover_letter::html::{render_html, Theme};
use crate::cover_letter::parser::{parse_letter, ParsedLetter};
use crate::errors::AppError;

const DEFAULT_FILENAME: &str = "cover-letter";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AssembleResponse {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct HtmlRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub content: String,
    pub filename: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letter/assemble
///
/// Builds the canonical letter text from identity fields and an AI-written body.
/// The date is always today's, taken from the server clock.
pub async fn handle_assemble(Json(parts): Json<CoverLetterParts>) -> Json<AssembleResponse> {
    Json(AssembleResponse {
        content: assemble_cover_letter(&parts),
    })
}

/// POST /api/v1/cover-letter/parse
pub async fn handle_parse(Json(request): Json<ContentRequest>) -> Json<ParsedLetter> {
    Json(parse_letter(&request.content))
}

/// POST /api/v1/cover-letter/html
pub async fn handle_html(Json(request): Json<HtmlRequest>) -> Html<String> {
    Html(render_html(&request.content, request.theme))
}

/// POST /api/v1/cover-letter/docx
///
/// DOCX packing is CPU-bound, so it runs on the blocking pool.
pub async fn handle_docx(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    let filename = attachment_name(request.filename.as_deref(), "docx");
    let content = request.content;

    let bytes = tokio::task::spawn_blocking(move || render_docx(&content))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("DOCX render task failed: {e}")))??;

    Ok((
        [
            (CONTENT_TYPE, DOCX_MIME.to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/cover-letter/txt
pub async fn handle_txt(Json(request): Json<ExportRequest>) -> Response {
    let filename = attachment_name(request.filename.as_deref(), "txt");

    (
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        request.content,
    )
        .into_response()
}

/// Safe download name with the given extension; falls back to `cover-letter`.
fn attachment_name(requested: Option<&str>, extension: &str) -> String {
    let stem = requested
        .map(sanitize_filename::sanitize)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
    format!("{stem}.{extension}")
}
