use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-chain slice of the wallet's total balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainBalance {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub usd_value: f64,
}

/// Wallet-wide balance snapshot.
///
/// Zero-value chains stay in `chain_list`; the renderer filters them out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub total_usd_value: f64,
    pub chain_list: Vec<ChainBalance>,
}

/// A single token held by the tracked wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenHolding {
    pub id: String,
    pub chain: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub price: f64,
    pub price_24h_change: Option<f64>,
    pub amount: f64,
    /// Derived at normalization time: price × amount.
    pub usd_value: f64,
}

/// One send or receive leg of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferLeg {
    pub amount: f64,
    pub token_id: String,
}

/// A transaction normalized for display. Token/project dictionary lookups
/// are resolved while normalizing, so the view carries ready-to-render
/// strings rather than raw ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    pub id: String,
    pub chain: String,
    pub time_at: i64,
    pub cate_id: Option<String>,
    pub is_scam: bool,
    pub project_id: Option<String>,
    pub sends: Vec<TransferLeg>,
    pub receives: Vec<TransferLeg>,
    pub name: String,
    pub status: i64,
    pub eth_gas_fee: f64,
    pub usd_gas_fee: f64,
    pub display_name: String,
    pub icon_url: String,
    pub send_lines: Vec<String>,
    pub receive_lines: Vec<String>,
}

/// One position inside a protocol (a pool, a lending market, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub name: String,
    pub supply_tokens: Vec<String>,
    pub reward_tokens: Vec<String>,
    pub net_usd_value: f64,
}

/// A protocol the wallet holds positions in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolPosition {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub items: Vec<PortfolioItem>,
}

impl ProtocolPosition {
    /// Aggregate displayed value, summed at call time rather than cached.
    pub fn total_usd_value(&self) -> f64 {
        self.items.iter().map(|i| i.net_usd_value).sum()
    }
}

/// Whole-dashboard state container. Rebuilt slice by slice each refresh
/// cycle; a failed cycle leaves the previous slices in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardView {
    pub balance: BalanceSnapshot,
    pub tokens: Vec<TokenHolding>,
    pub transactions: Vec<TransactionView>,
    pub protocols: Vec<ProtocolPosition>,
    pub updated_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}
