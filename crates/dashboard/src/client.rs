//! HTTP client for the proxy gateway.

use async_trait::async_trait;
use serde_json::Value;

use walletstats_common::config::AppConfig;
use walletstats_common::error::AppError;

/// Source of the four dashboard payloads. The refresh loop depends on this
/// trait rather than on a concrete client so cycles can be tested against
/// canned payloads.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn total_balance(&self) -> Result<Value, AppError>;
    async fn history_list(&self) -> Result<Value, AppError>;
    async fn token_list(&self) -> Result<Value, AppError>;
    async fn complex_protocol_list(&self) -> Result<Value, AppError>;
}

/// Fetches stats payloads through the proxy gateway's single route.
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
    wallet_address: String,
    chain_id: String,
    history_page_count: u32,
}

impl StatsClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.gateway_base_url.trim_end_matches('/').to_string(),
            wallet_address: config.wallet_address.clone(),
            chain_id: config.chain_id.clone(),
            history_page_count: config.history_page_count,
        }
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, AppError> {
        let url = format!("{}/api/stats/proxy", self.base_url);
        let mut query: Vec<(&str, String)> = vec![("endpoint", endpoint.to_string())];
        query.extend(params.iter().cloned());

        tracing::debug!(endpoint, "Fetching stats payload via gateway");
        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl StatsProvider for StatsClient {
    async fn total_balance(&self) -> Result<Value, AppError> {
        self.fetch("user/total_balance", &[("id", self.wallet_address.clone())])
            .await
    }

    async fn history_list(&self) -> Result<Value, AppError> {
        self.fetch(
            "user/history_list",
            &[
                ("id", self.wallet_address.clone()),
                ("chain_id", self.chain_id.clone()),
                ("page_count", self.history_page_count.to_string()),
            ],
        )
        .await
    }

    async fn token_list(&self) -> Result<Value, AppError> {
        self.fetch(
            "user/token_list",
            &[
                ("id", self.wallet_address.clone()),
                ("is_all", "false".to_string()),
            ],
        )
        .await
    }

    async fn complex_protocol_list(&self) -> Result<Value, AppError> {
        self.fetch(
            "user/complex_protocol_list",
            &[("id", self.wallet_address.clone())],
        )
        .await
    }
}
