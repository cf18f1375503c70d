use serde::Deserialize;

/// Tracked wallet used when no `WALLET_ADDRESS` override is supplied.
pub const DEFAULT_WALLET: &str = "0xddc23d34ea2f6920d15995607d00def9478ded6d";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the upstream wallet-data API
    pub upstream_base_url: String,

    /// Server-held upstream access key. The gateway refuses proxy calls
    /// when this is absent; startup itself does not fail so the health
    /// route stays probeable.
    pub access_key: Option<String>,

    /// Port the proxy gateway listens on
    pub gateway_port: u16,

    /// Gateway base URL the dashboard client talks to
    pub gateway_base_url: String,

    /// Wallet address the dashboard tracks
    pub wallet_address: String,

    /// Chain filter for transaction history (default: base)
    pub chain_id: String,

    /// Dashboard refresh period in seconds (default: 30)
    pub refresh_interval_secs: u64,

    /// Number of history entries requested per refresh (default: 20)
    pub history_page_count: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            upstream_base_url: std::env::var("UPSTREAM_BASE_URL")
                .unwrap_or_else(|_| "https://pro-openapi.debank.com/v1".to_string()),
            access_key: std::env::var("DEBANK_ACCESS_KEY").ok(),
            gateway_port: std::env::var("GATEWAY_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("GATEWAY_PORT must be a valid u16"))?,
            gateway_base_url: std::env::var("GATEWAY_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string()),
            wallet_address: std::env::var("WALLET_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_WALLET.to_string()),
            chain_id: std::env::var("CHAIN_ID").unwrap_or_else(|_| "base".to_string()),
            refresh_interval_secs: std::env::var("REFRESH_INTERVAL_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REFRESH_INTERVAL_SECS must be a valid u64"))?,
            history_page_count: std::env::var("HISTORY_PAGE_COUNT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HISTORY_PAGE_COUNT must be a valid u32"))?,
        })
    }
}
