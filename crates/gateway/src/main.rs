//! WalletStats proxy gateway binary entrypoint.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use walletstats_common::config::AppConfig;

use walletstats_gateway::routes::create_router;
use walletstats_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("walletstats_gateway=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting WalletStats proxy gateway...");

    // Load configuration
    let config = AppConfig::from_env()?;
    if config.access_key.is_none() {
        tracing::warn!("DEBANK_ACCESS_KEY is not set; proxy calls will be rejected");
    }

    let port = config.gateway_port;

    // Build application state
    let state = AppState::new(config);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Proxy gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
