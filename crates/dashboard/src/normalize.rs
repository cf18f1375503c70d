//! Normalization of untyped upstream payloads into display models.
//!
//! The upstream API returns loosely-typed JSON: numbers arrive as numbers
//! or strings, optional objects are sometimes missing entirely, and batch
//! responses carry token/project dictionaries alongside the record list.
//! Everything here is a pure function over `serde_json::Value` so the rules
//! stay testable without any network.

use serde_json::Value;

use walletstats_common::logos::ProtocolLogos;
use walletstats_common::types::{
    BalanceSnapshot, ChainBalance, PortfolioItem, ProtocolPosition, TokenHolding,
    TransactionView, TransferLeg,
};
use walletstats_common::error::AppError;

use crate::format;

/// Asset reference for chains without a logo.
pub const PLACEHOLDER_LOGO: &str = "/placeholder.png";

/// Icon for plain transfers on the tracked chain.
pub const NATIVE_CHAIN_ICON: &str = "/base-chain.png";

/// Logo served for any project id containing "aerodrome", regardless of
/// whether the project dictionary resolves it.
const AERODROME_LOGO: &str =
    "https://static.debank.com/image/project/logo_url/base_aerodrome/f02d753bc321dc8ba480f0424a686482.png";

/// Read-only inputs the transaction normalizer needs beyond the payload.
pub struct NormalizeContext<'a> {
    pub tracked_chain: &'a str,
    pub logos: &'a ProtocolLogos,
}

/// Safe numeric coercion: numbers pass through, numeric strings parse,
/// anything else becomes 0.
pub fn num(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Non-empty string field, if present.
fn text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

// ───────────────────────────── balance ──────────────────────────────

/// Normalize a `user/total_balance` payload.
///
/// A non-array `chain_list` yields an empty list rather than an error;
/// zero-value chains are kept and filtered only at render time.
pub fn normalize_balance(payload: &Value) -> BalanceSnapshot {
    let chain_list = payload["chain_list"]
        .as_array()
        .map(|chains| chains.iter().map(chain_balance).collect())
        .unwrap_or_default();

    BalanceSnapshot {
        total_usd_value: num(&payload["total_usd_value"]),
        chain_list,
    }
}

fn chain_balance(chain: &Value) -> ChainBalance {
    ChainBalance {
        id: chain["id"].as_str().unwrap_or_default().to_string(),
        name: text(&chain["name"]).unwrap_or("Unknown Chain").to_string(),
        logo_url: text(&chain["logo_url"]).unwrap_or(PLACEHOLDER_LOGO).to_string(),
        usd_value: num(&chain["usd_value"]),
    }
}

// ───────────────────────────── history ──────────────────────────────

/// Normalize a `user/history_list` payload.
///
/// The batch-level `token_dict` and `project_dict` are consulted for every
/// record. Transactions flagged scam, or whose approval target token is
/// flagged scam in the dictionary, are suppressed entirely.
pub fn normalize_history(
    payload: &Value,
    ctx: &NormalizeContext<'_>,
) -> Result<Vec<TransactionView>, AppError> {
    let history = payload["history_list"].as_array().ok_or_else(|| {
        AppError::Payload("Invalid transaction data format received".to_string())
    })?;

    let token_dict = &payload["token_dict"];
    let project_dict = &payload["project_dict"];

    Ok(history
        .iter()
        .filter(|tx| !is_suppressed(tx, token_dict))
        .map(|tx| transaction_view(tx, token_dict, project_dict, ctx))
        .collect())
}

/// Scam suppression: the transaction's own flag, or a flagged approval
/// target in the token dictionary.
fn is_suppressed(tx: &Value, token_dict: &Value) -> bool {
    if tx["is_scam"].as_bool().unwrap_or(false) {
        return true;
    }
    if let Some(token_id) = text(&tx["token_approve"]["token_id"]) {
        if token_dict[token_id]["is_scam"].as_bool().unwrap_or(false) {
            return true;
        }
    }
    false
}

fn transfer_legs(value: &Value) -> Vec<TransferLeg> {
    value
        .as_array()
        .map(|legs| {
            legs.iter()
                .map(|leg| TransferLeg {
                    amount: num(&leg["amount"]),
                    token_id: leg["token_id"].as_str().unwrap_or_default().to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn transaction_view(
    tx: &Value,
    token_dict: &Value,
    project_dict: &Value,
    ctx: &NormalizeContext<'_>,
) -> TransactionView {
    let sends = transfer_legs(&tx["sends"]);
    let receives = transfer_legs(&tx["receives"]);
    let cate_id = text(&tx["cate_id"]).map(str::to_string);
    let project_id = text(&tx["project_id"]).map(str::to_string);
    let chain = tx["chain"].as_str().unwrap_or_default().to_string();
    let decoded_name = text(&tx["tx"]["name"]);

    let display_name = resolve_display_name(
        cate_id.as_deref(),
        decoded_name,
        !sends.is_empty(),
        !receives.is_empty(),
    );
    let icon_url = resolve_icon(&chain, project_id.as_deref(), project_dict, ctx);

    let send_lines = sends
        .iter()
        .map(|leg| transfer_line(leg, token_dict, true))
        .collect();
    let receive_lines = receives
        .iter()
        .map(|leg| transfer_line(leg, token_dict, false))
        .collect();

    TransactionView {
        id: tx["id"].as_str().unwrap_or_default().to_string(),
        chain,
        time_at: num(&tx["time_at"]) as i64,
        cate_id,
        is_scam: false,
        project_id,
        name: decoded_name.unwrap_or("Unknown Transaction").to_string(),
        status: tx["tx"]["status"].as_i64().unwrap_or(0),
        eth_gas_fee: num(&tx["tx"]["eth_gas_fee"]),
        usd_gas_fee: num(&tx["tx"]["usd_gas_fee"]),
        sends,
        receives,
        display_name,
        icon_url,
        send_lines,
        receive_lines,
    }
}

/// Display-name resolution order: category dictionary, decoded name,
/// direction of transfer legs, final fallback.
pub fn resolve_display_name(
    cate_id: Option<&str>,
    decoded_name: Option<&str>,
    has_sends: bool,
    has_receives: bool,
) -> String {
    if let Some(name) = cate_id.and_then(category_name) {
        return name.to_string();
    }
    if let Some(name) = decoded_name {
        return name.to_string();
    }
    if has_sends {
        return "Send".to_string();
    }
    if has_receives {
        return "Receive".to_string();
    }
    "Unnamed Transaction".to_string()
}

fn category_name(cate_id: &str) -> Option<&'static str> {
    match cate_id {
        "send" => Some("Send"),
        "receive" => Some("Receive"),
        "approve" => Some("Approve"),
        "cancel" => Some("Cancel"),
        _ => None,
    }
}

/// Icon resolution order: native-chain placeholder for plain transfers on
/// the tracked chain, project dictionary, hard-coded aerodrome match,
/// injected logo table, generic placeholder.
pub fn resolve_icon(
    chain: &str,
    project_id: Option<&str>,
    project_dict: &Value,
    ctx: &NormalizeContext<'_>,
) -> String {
    if chain == ctx.tracked_chain && project_id.is_none() {
        return NATIVE_CHAIN_ICON.to_string();
    }
    if let Some(id) = project_id {
        if let Some(logo) = text(&project_dict[id]["logo_url"]) {
            return logo.to_string();
        }
        if id.contains("aerodrome") {
            return AERODROME_LOGO.to_string();
        }
    }
    ctx.logos.logo_for(project_id).to_string()
}

/// Render one transfer leg against the batch token dictionary.
///
/// Non-fungible tokens get integer amounts and an item-identifier suffix;
/// fungible tokens get fixed 6-decimal amounts. Either way the USD value
/// (price × amount) is appended when the dictionary price is nonzero.
pub fn transfer_line(leg: &TransferLeg, token_dict: &Value, outgoing: bool) -> String {
    let token = &token_dict[leg.token_id.as_str()];
    let symbol = text(&token["symbol"])
        .or_else(|| text(&token["name"]))
        .unwrap_or("tokens");
    let is_nft = token["is_erc721"].as_bool().unwrap_or(false);

    let sign = if outgoing { "-" } else { "+" };
    let mut line = format!(
        "{sign}{} {symbol}",
        format::format_token_amount(leg.amount, is_nft)
    );

    if is_nft {
        if let Some(inner_id) = text(&token["inner_id"]) {
            line.push_str(&format!(" #{inner_id}"));
        }
    }

    let price = num(&token["price"]);
    if price != 0.0 {
        line.push_str(&format!(" (${})", format::compress(price * leg.amount)));
    }

    line
}

// ───────────────────────────── tokens ───────────────────────────────

/// Normalize a `user/token_list` payload into holdings sorted by
/// descending derived USD value.
pub fn normalize_tokens(payload: &Value) -> Vec<TokenHolding> {
    let mut holdings: Vec<TokenHolding> = payload
        .as_array()
        .map(|tokens| tokens.iter().map(token_holding).collect())
        .unwrap_or_default();

    holdings.sort_by(|a, b| b.usd_value.total_cmp(&a.usd_value));
    holdings
}

fn token_holding(token: &Value) -> TokenHolding {
    let price = num(&token["price"]);
    let amount = num(&token["amount"]);

    TokenHolding {
        id: token["id"].as_str().unwrap_or_default().to_string(),
        chain: token["chain"].as_str().unwrap_or_default().to_string(),
        symbol: text(&token["symbol"]).unwrap_or("?").to_string(),
        name: text(&token["name"]).unwrap_or_default().to_string(),
        decimals: token["decimals"].as_u64().unwrap_or(18) as u32,
        price,
        price_24h_change: token
            .get("price_24h_change")
            .filter(|v| !v.is_null())
            .map(num),
        amount,
        usd_value: price * amount,
    }
}

// ──────────────────────────── protocols ─────────────────────────────

/// Normalize a `user/complex_protocol_list` payload. Aggregate values are
/// not computed here; `ProtocolPosition::total_usd_value` sums items at
/// render time.
pub fn normalize_protocols(payload: &Value) -> Result<Vec<ProtocolPosition>, AppError> {
    let protocols = payload
        .as_array()
        .ok_or_else(|| AppError::Payload("Invalid protocol data format received".to_string()))?;

    Ok(protocols.iter().map(protocol_position).collect())
}

fn protocol_position(protocol: &Value) -> ProtocolPosition {
    let items = protocol["portfolio_item_list"]
        .as_array()
        .map(|items| items.iter().map(portfolio_item).collect())
        .unwrap_or_default();

    ProtocolPosition {
        id: protocol["id"].as_str().unwrap_or_default().to_string(),
        name: text(&protocol["name"]).unwrap_or_default().to_string(),
        logo_url: text(&protocol["logo_url"])
            .unwrap_or(walletstats_common::logos::PLACEHOLDER_PROTOCOL_LOGO)
            .to_string(),
        items,
    }
}

fn portfolio_item(item: &Value) -> PortfolioItem {
    PortfolioItem {
        name: text(&item["name"]).unwrap_or_default().to_string(),
        supply_tokens: token_symbols(&item["detail"]["supply_token_list"]),
        reward_tokens: token_symbols(&item["detail"]["reward_token_list"]),
        net_usd_value: num(&item["stats"]["net_usd_value"]),
    }
}

fn token_symbols(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|tokens| {
            tokens
                .iter()
                .filter_map(|t| text(&t["symbol"]))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ─────────────────────────────── tests ──────────────────────────────
