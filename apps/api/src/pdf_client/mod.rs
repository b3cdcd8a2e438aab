//! PDF client: hands compiled LaTeX source to the external compilation server.
//!
//! The server contract: `POST {base}/compile` with `{"latex", "compiler"}` and an
//! `X-API-Key` header. Success is a raw PDF body; failure is JSON `{"error"}`.
//! No retries here: the caller decides whether to re-submit.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Compilation failed (status {status}): {message}")]
    Compile { status: u16, message: String },

    #[error("Compilation server did not return a PDF (content-type: {0})")]
    NotPdf(String),
}

/// Anything that can turn LaTeX source into PDF bytes.
#[async_trait]
pub trait PdfCompiler: Send + Sync {
    async fn compile(&self, latex: &str) -> Result<Bytes, PdfError>;
}

#[derive(Debug, Serialize)]
struct CompileRequest<'a> {
    latex: &'a str,
    compiler: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompileErrorBody {
    error: Option<String>,
    details: Option<String>,
}

/// HTTP client for the LaTeX compilation server.
#[derive(Clone)]
pub struct LatexServerClient {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
    compiler: String,
}

impl LatexServerClient {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.latex_server_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config
                .latex_server_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string()),
            api_key: config.latex_server_api_key.clone(),
            compiler: config.latex_compiler.clone(),
        })
    }
}

#[async_trait]
impl PdfCompiler for LatexServerClient {
    async fn compile(&self, latex: &str) -> Result<Bytes, PdfError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(PdfError::NotConfigured("LATEX_SERVER_URL"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PdfError::NotConfigured("LATEX_SERVER_API_KEY"))?;

        info!("Sending {} bytes of LaTeX to compilation server", latex.len());

        let response = self
            .client
            .post(format!("{base_url}/compile"))
            .header("X-API-Key", api_key)
            .json(&CompileRequest {
                latex,
                compiler: &self.compiler,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body)
                .unwrap_or_else(|| format!("Compilation failed: {}", status.as_u16()));
            error!("PDF compilation failed ({status}): {message}");
            return Err(PdfError::Compile {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("application/pdf") {
            return Err(PdfError::NotPdf(content_type));
        }

        let pdf = response.bytes().await?;
        info!("PDF compilation succeeded: {} bytes", pdf.len());
        Ok(pdf)
    }
}

/// Pulls `error` (and `details`, when present) out of the server's JSON error body.
fn extract_error_message(body: &str) -> Option<String> {
    let parsed: CompileErrorBody = serde_json::from_str(body).ok()?;
    match (parsed.error, parsed.details) {
        (Some(error), Some(details)) => Some(format!("{error}: {details}")),
        (Some(error), None) => Some(error),
        (None, Some(details)) => Some(details),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>, key: Option<&str>) -> Config {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            latex_server_url: url.map(str::to_string),
            latex_server_api_key: key.map(str::to_string),
            latex_compiler: "pdflatex".to_string(),
            latex_server_timeout_secs: 5,
        }
    }

    #[test]
    fn test_extract_error_with_details() {
        let body = r#"{"error": "Compilation failed", "details": "! Undefined control sequence."}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Compilation failed: ! Undefined control sequence.")
        );
    }

    #[test]
    fn test_extract_error_plain() {
        assert_eq!(
            extract_error_message(r#"{"error": "Invalid or missing API key"}"#).as_deref(),
            Some("Invalid or missing API key")
        );
    }

    #[test]
    fn test_extract_error_from_non_json() {
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message("{}"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = LatexServerClient::from_config(&config(Some("http://latex:3001/"), Some("k")))
            .unwrap();
        assert_eq!(client.base_url.as_deref(), Some("http://latex:3001"));
    }

    #[tokio::test]
    async fn test_missing_url_is_not_configured() {
        let client = LatexServerClient::from_config(&config(None, Some("k"))).unwrap();
        let err = client.compile("\\end{document}").await.unwrap_err();
        assert!(matches!(err, PdfError::NotConfigured("LATEX_SERVER_URL")));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = LatexServerClient::from_config(&config(Some("http://latex"), None)).unwrap();
        let err = client.compile("\\end{document}").await.unwrap_err();
        assert!(matches!(err, PdfError::NotConfigured("LATEX_SERVER_API_KEY")));
    }
}
