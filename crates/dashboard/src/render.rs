//! Console rendering of the dashboard view.

use chrono::{DateTime, Utc};

use walletstats_common::types::DashboardView;

use crate::format;

/// Number of token holdings shown in the compact view.
pub const COMPACT_TOKEN_COUNT: usize = 10;

/// Render the merged dashboard state as display text.
///
/// A set error replaces the whole view with a single message; there is no
/// partial-data-plus-error display.
pub fn render(view: &DashboardView, now: DateTime<Utc>) -> String {
    if let Some(error) = &view.error {
        return format!("Error: {error}");
    }

    let mut out = String::new();

    out.push_str("Total Balance\n");
    out.push_str(&format!(
        "  ${}\n",
        format::format_usd(view.balance.total_usd_value)
    ));

    out.push_str("\nChain Balances\n");
    let funded: Vec<_> = view
        .balance
        .chain_list
        .iter()
        .filter(|chain| chain.usd_value > 0.0)
        .collect();
    if funded.is_empty() {
        out.push_str("  No chain balances found\n");
    } else {
        for chain in funded {
            out.push_str(&format!(
                "  {}  ${}\n",
                chain.name,
                format::format_usd(chain.usd_value)
            ));
        }
    }

    if !view.tokens.is_empty() {
        out.push_str("\nTop Holdings\n");
        for token in view.tokens.iter().take(COMPACT_TOKEN_COUNT) {
            let change = token
                .price_24h_change
                .map(|pct| format!(" ({:+.2}%)", pct * 100.0))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {}  {} @ ${}{}  = ${}\n",
                token.symbol,
                format::compress(token.amount),
                format::compress(token.price),
                change,
                format::format_usd(token.usd_value)
            ));
        }
    }

    if !view.transactions.is_empty() {
        out.push_str("\nRecent Transactions\n");
        for tx in &view.transactions {
            out.push_str(&format!(
                "  {}  {}\n",
                tx.display_name,
                format::relative_age(tx.time_at, now)
            ));
            for line in tx.send_lines.iter().chain(&tx.receive_lines) {
                out.push_str(&format!("    {line}\n"));
            }
            out.push_str(&format!(
                "    Gas: ${}\n",
                format::format_usd(tx.usd_gas_fee)
            ));
        }
    }

    if !view.protocols.is_empty() {
        out.push_str("\nProtocol Positions\n");
        for protocol in &view.protocols {
            out.push_str(&format!(
                "  {}  ${}\n",
                protocol.name,
                format::format_usd(protocol.total_usd_value())
            ));
            for item in &protocol.items {
                out.push_str(&format!(
                    "    {}: {}  ${}\n",
                    item.name,
                    item.supply_tokens.join(" + "),
                    format::format_usd(item.net_usd_value)
                ));
            }
        }
    }

    out
}
