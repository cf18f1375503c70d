//! WalletStats dashboard binary entrypoint.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use walletstats_common::config::AppConfig;
use walletstats_common::logos::ProtocolLogos;

use walletstats_dashboard::client::StatsClient;
use walletstats_dashboard::refresh::DashboardRefresher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("walletstats_dashboard=info")),
        )
        .init();

    tracing::info!("Starting WalletStats dashboard...");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(
        wallet = %config.wallet_address,
        chain = %config.chain_id,
        gateway = %config.gateway_base_url,
        "Tracking wallet via proxy gateway"
    );

    let client = Arc::new(StatsClient::new(&config));
    let refresher = DashboardRefresher::new(
        client,
        ProtocolLogos::default_set(),
        config.chain_id.clone(),
        config.refresh_interval_secs,
    );

    // Run with graceful shutdown on Ctrl+C. Cancelling the select drops
    // the refresh loop between awaits, so no request outlives the process.
    tokio::select! {
        result = refresher.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Refresh loop exited with error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("WalletStats dashboard stopped.");
    Ok(())
}
