mod config;
mod enrichment;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enrichment::LookupClient;
use crate::llm_client::CompletionClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pitchpilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize completion client
    let llm = CompletionClient::new(config.openai_api_key.clone());
    info!("Completion client initialized (model: {})", llm_client::MODEL);

    // Recipient lookup is only available when its credential is configured
    let lookup = config.clearbit_api_key.clone().map(LookupClient::new);
    match &lookup {
        Some(_) => info!("Recipient lookup client initialized"),
        None => info!("CLEARBIT_API_KEY not set; email enrichment disabled"),
    }

    // Build app state
    let state = AppState { llm, lookup };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: tighten CORS in production
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
