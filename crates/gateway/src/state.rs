//! Shared application state for the Axum proxy server.

use walletstats_common::config::AppConfig;

/// Application state shared across all route handlers via Axum `State`.
/// The gateway is stateless beyond its config and its HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}
