use std::sync::Arc;

use crate::config::Config;
use crate::pdf_client::PdfCompiler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// External LaTeX → PDF service. Default: LatexServerClient.
    pub pdf: Arc<dyn PdfCompiler>,
}
