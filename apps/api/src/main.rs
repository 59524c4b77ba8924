mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::PortfolioAnalyzer;
use crate::analysis::recommendations::RecommendationEngine;
use crate::config::Config;
use crate::llm_client::{HfInferenceClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // Remote generator: credential is looked up per call, so a missing token is not fatal here
    let generator = HfInferenceClient::from_config(&config)?;
    info!(
        "Inference client initialized (model: {}, timeout: {:?}, credential env: {})",
        generator.model_label(),
        config.hf_timeout(),
        config.hf_token_var
    );

    let recommender = RecommendationEngine::new(Arc::new(generator), config.hf_timeout());

    let state = AppState {
        analyzer: PortfolioAnalyzer::new(recommender),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
