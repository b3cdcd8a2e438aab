use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// The PDF service settings are optional: without them the service still starts and
/// the PDF endpoint reports itself unavailable.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub latex_server_url: Option<String>,
    pub latex_server_api_key: Option<String>,
    pub latex_compiler: String,
    pub latex_server_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            latex_server_url: optional_env("LATEX_SERVER_URL"),
            latex_server_api_key: optional_env("LATEX_SERVER_API_KEY"),
            latex_compiler: std::env::var("LATEX_COMPILER")
                .unwrap_or_else(|_| "pdflatex".to_string()),
            latex_server_timeout_secs: std::env::var("LATEX_SERVER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("LATEX_SERVER_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

/// Unset and blank are both treated as "not configured".
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
