pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers as cover_letter;
use crate::latex::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV / resume
        .route("/api/v1/cv/template", get(resume::handle_cv_template))
        .route("/api/v1/resume/latex", post(resume::handle_generate_latex))
        .route("/api/v1/resume/pdf", post(resume::handle_compile_pdf))
        // Cover letters
        .route(
            "/api/v1/cover-letter/assemble",
            post(cover_letter::handle_assemble),
        )
        .route("/api/v1/cover-letter/parse", post(cover_letter::handle_parse))
        .route("/api/v1/cover-letter/html", post(cover_letter::handle_html))
        .route("/api/v1/cover-letter/docx", post(cover_letter::handle_docx))
        .route("/api/v1/cover-letter/txt", post(cover_letter::handle_txt))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::pdf_client::{PdfCompiler, PdfError};

    const FAKE_PDF: &[u8] = b"%PDF-1.5 fake";

    /// Stands in for the external compilation server.
    enum StubPdf {
        Ok,
        Fails(u16),
        Unconfigured,
    }

    #[async_trait]
    impl PdfCompiler for StubPdf {
        async fn compile(&self, _latex: &str) -> Result<Bytes, PdfError> {
            match self {
                StubPdf::Ok => Ok(Bytes::from_static(FAKE_PDF)),
                StubPdf::Fails(status) => Err(PdfError::Compile {
                    status: *status,
                    message: "! Undefined control sequence.".to_string(),
                }),
                StubPdf::Unconfigured => Err(PdfError::NotConfigured("LATEX_SERVER_URL")),
            }
        }
    }

    fn app(pdf: StubPdf) -> Router {
        build_router(AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                latex_server_url: None,
                latex_server_api_key: None,
                latex_compiler: "pdflatex".to_string(),
                latex_server_timeout_secs: 5,
            },
            pdf: Arc::new(pdf),
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(StubPdf::Ok)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["pdf_service_configured"], false);
    }

    #[tokio::test]
    async fn test_cv_template_has_every_field() {
        let response = app(StubPdf::Ok)
            .oneshot(Request::get("/api/v1/cv/template").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["personal_info"]["name"], "");
        assert_eq!(json["education"], json!([]));
        assert_eq!(json["skills"]["tools"], json!([]));
    }

    #[tokio::test]
    async fn test_latex_from_cv() {
        let response = post_json(
            app(StubPdf::Ok),
            "/api/v1/resume/latex",
            json!({ "cv": { "personal_info": { "name": "Ada" }, "skills": { "languages": ["Rust"] } } }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let latex = json["latex"].as_str().unwrap();
        assert!(latex.contains("\\scshape Ada}"));
        assert!(latex.contains("\\textbf{Languages}{: Rust}"));
        assert!(latex.ends_with("\\end{document}"));
    }

    #[tokio::test]
    async fn test_latex_requires_cv() {
        let response = post_json(app(StubPdf::Ok), "/api/v1/resume/latex", json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pdf_returns_bytes() {
        let response = post_json(
            app(StubPdf::Ok),
            "/api/v1/resume/pdf",
            json!({ "latex": "\\documentclass{article}" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(body_bytes(response).await.as_ref(), FAKE_PDF);
    }

    #[tokio::test]
    async fn test_pdf_requires_latex() {
        let response =
            post_json(app(StubPdf::Ok), "/api/v1/resume/pdf", json!({ "latex": "  " })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_pdf_unconfigured_is_503() {
        let response = post_json(
            app(StubPdf::Unconfigured),
            "/api/v1/resume/pdf",
            json!({ "latex": "x" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_pdf_compile_failure_surfaces_message() {
        let response =
            post_json(app(StubPdf::Fails(500)), "/api/v1/resume/pdf", json!({ "latex": "x" }))
                .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "! Undefined control sequence.");
    }

    #[tokio::test]
    async fn test_assemble_then_parse() {
        let response = post_json(
            app(StubPdf::Ok),
            "/api/v1/cover-letter/assemble",
            json!({
                "name": "Jane Doe",
                "email": "j@x.com",
                "phone": "",
                "company": "Acme",
                "body": "Para one.\n\nPara two."
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let content = body_json(response).await["content"]
            .as_str()
            .unwrap()
            .to_string();

        let response = post_json(
            app(StubPdf::Ok),
            "/api/v1/cover-letter/parse",
            json!({ "content": content }),
        )
        .await;
        let parsed = body_json(response).await;
        assert_eq!(parsed["name"], "Jane Doe");
        assert_eq!(parsed["contact"], json!(["Email: j@x.com"]));
        assert_eq!(
            parsed["body"],
            json!(["Dear Hiring Manager,", "Para one.", "Para two."])
        );
        assert_eq!(parsed["footer"], json!(["Sincerely,", "Jane Doe"]));
    }

    #[tokio::test]
    async fn test_html_dark_theme() {
        let response = post_json(
            app(StubPdf::Ok),
            "/api/v1/cover-letter/html",
            json!({ "content": "Jane <Doe>", "theme": "dark" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let html = String::from_utf8(body_bytes(response).await.to_vec()).unwrap();
        assert!(html.contains("#1a1a2e"));
        assert!(html.contains("Jane &lt;Doe&gt;"));
    }

    #[tokio::test]
    async fn test_docx_download() {
        let response = post_json(
            app(StubPdf::Ok),
            "/api/v1/cover-letter/docx",
            json!({ "content": "", "filename": "acme" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"acme.docx\""
        );
        assert!(body_bytes(response).await.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_txt_download() {
        let response = post_json(
            app(StubPdf::Ok),
            "/api/v1/cover-letter/txt",
            json!({ "content": "Jane\n\nDear Hiring Manager," }),
        )
        .await;
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cover-letter.txt\""
        );
        assert_eq!(
            body_bytes(response).await.as_ref(),
            b"Jane\n\nDear Hiring Manager,"
        );
    }
}
