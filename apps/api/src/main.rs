mod analysis;
mod config;
mod db;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::Analyzer;
use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::PdfTextExtractor;
use crate::llm_client::{GeminiTransport, GenerationClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;

    // Scratch space for uploads while text is extracted
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {}", config.upload_dir.display()))?;
    let extractor = Arc::new(PdfTextExtractor::new(config.upload_dir.clone()));

    // Initialize generation client
    let transport = GeminiTransport::new(
        config.gemini_api_url.clone(),
        config.gemini_api_key.clone(),
    )?;
    let retry_policy = config.retry_policy();
    let client = GenerationClient::new(Arc::new(transport), retry_policy);
    info!(
        "Generation client initialized (max_retries: {}, initial_delay: {:?}, attempt_timeout: {:?})",
        retry_policy.max_retries, retry_policy.initial_delay, retry_policy.attempt_timeout
    );

    // Build app state
    let state = AppState {
        db,
        analyzer: Analyzer::new(client),
        extractor,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
