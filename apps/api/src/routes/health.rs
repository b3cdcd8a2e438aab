use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and whether the PDF service is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "mastercv-api",
        "pdf_service_configured": state.config.latex_server_url.is_some()
            && state.config.latex_server_api_key.is_some(),
    }))
}
