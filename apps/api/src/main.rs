mod config;
mod cover_letter;
mod errors;
mod latex;
mod models;
mod pdf_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::pdf_client::LatexServerClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Master CV API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PDF compilation client
    let pdf = LatexServerClient::from_config(&config)?;
    match &config.latex_server_url {
        Some(url) => info!(
            "PDF client initialized (server: {url}, compiler: {})",
            config.latex_compiler
        ),
        None => warn!("LATEX_SERVER_URL not set; PDF compilation will be unavailable"),
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        pdf: Arc::new(pdf),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
