mod analysis;
mod config;
mod delivery;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::synthesizer::LlmIdeaSynthesizer;
use crate::config::Config;
use crate::delivery::{WebhookPublisher, API_KEY_VAR, URL_VAR};
use crate::llm_client::LlmClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("idea_relay={},tower_http={}", config.rust_log, config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting idea relay v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
        config.llm_timeout,
    )
    .context("Failed to build LLM HTTP client")?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm.model(),
        config.llm_timeout.as_secs()
    );

    // Initialize webhook publisher; missing settings fail each delivery, not startup
    let publisher =
        WebhookPublisher::from_config(&config).context("Failed to build webhook HTTP client")?;
    if config.webhook_url.is_none() || config.webhook_api_key.is_none() {
        warn!("{URL_VAR} or {API_KEY_VAR} is not set; every delivery will fail until configured");
    }

    let cors = cors_layer(&config)?;
    info!("CORS allowed origins: {:?}", config.allowed_origins);

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        synthesizer: Arc::new(LlmIdeaSynthesizer::new(llm)),
        publisher: Arc::new(publisher),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
