//! Axum route handlers for the Resume API.

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::latex::compile_resume;
use crate::models::cv::CvRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LatexRequest {
    pub cv: Option<CvRecord>,
}

#[derive(Debug, Serialize)]
pub struct LatexResponse {
    pub message: String,
    pub latex: String,
}

#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    #[serde(default)]
    pub latex: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/cv/template
///
/// Returns an empty CV with every field present, for new users and editors.
pub async fn handle_cv_template() -> Json<CvRecord> {
    Json(CvRecord::default())
}

/// POST /api/v1/resume/latex
///
/// Compiles a CV record to LaTeX source.
pub async fn handle_generate_latex(
    Json(request): Json<LatexRequest>,
) -> Result<Json<LatexResponse>, AppError> {
    let cv = request
        .cv
        .ok_or_else(|| AppError::Validation("CV data is required".to_string()))?;

    let latex = compile_resume(&cv);

    Ok(Json(LatexResponse {
        message: "LaTeX generated successfully".to_string(),
        latex,
    }))
}

/// POST /api/v1/resume/pdf
///
/// Forwards LaTeX source to the compilation server and streams back the PDF.
pub async fn handle_compile_pdf(
    State(state): State<AppState>,
    Json(request): Json<PdfRequest>,
) -> Result<Response, AppError> {
    if request.latex.trim().is_empty() {
        return Err(AppError::Validation(
            "LaTeX content is required".to_string(),
        ));
    }

    let pdf = state.pdf.compile(&request.latex).await?;
    info!("Returning compiled PDF ({} bytes)", pdf.len());

    Ok((
        [
            (CONTENT_TYPE, "application/pdf"),
            (CONTENT_DISPOSITION, "attachment; filename=\"resume.pdf\""),
        ],
        pdf,
    )
        .into_response())
}
