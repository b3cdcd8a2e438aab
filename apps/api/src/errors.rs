use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cover_letter::docx::RenderError;
use crate::pdf_client::PdfError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Pdf(PdfError::NotConfigured(var)) => {
                tracing::error!("{var} not configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PDF_SERVICE_UNAVAILABLE",
                    format!(
                        "LaTeX compilation server is not configured. Please set the {var} environment variable."
                    ),
                )
            }
            AppError::Pdf(PdfError::Compile { status, message }) => (
                // Upstream status passes through when it is a usable error status.
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                "PDF_COMPILE_ERROR",
                message.clone(),
            ),
            AppError::Pdf(e @ PdfError::NotPdf(_)) => {
                tracing::error!("{e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PDF_COMPILE_ERROR",
                    "Server did not return a PDF. Compilation server may not be configured."
                        .to_string(),
                )
            }
            AppError::Pdf(PdfError::Http(e)) => {
                tracing::error!("PDF service HTTP error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PDF_SERVICE_ERROR",
                    "Could not reach the LaTeX compilation server".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Failed to generate the document".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let response = AppError::Validation("cv is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unconfigured_pdf_service_is_unavailable() {
        let response = AppError::from(PdfError::NotConfigured("LATEX_SERVER_URL")).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_compile_error_passes_upstream_status_through() {
        let response = AppError::from(PdfError::Compile {
            status: 401,
            message: "Invalid or missing API key".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_compile_error_with_success_status_becomes_bad_gateway() {
        let response = AppError::from(PdfError::Compile {
            status: 302,
            message: "redirect".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_pdf_is_bad_gateway() {
        let response = AppError::from(PdfError::NotPdf("text/html".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_render_error_is_internal() {
        let response = AppError::from(RenderError::Docx("zip".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
