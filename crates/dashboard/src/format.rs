//! Display formatting helpers for USD values, token amounts, and ages.

use chrono::{DateTime, Utc};

/// Thousands-separated, fixed two-decimal USD formatting.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let value = value.abs();

    let mut whole = value.trunc() as u64;
    let mut cents = ((value - value.trunc()) * 100.0).round() as u64;
    if cents == 100 {
        whole += 1;
        cents = 0;
    }

    format!("{sign}{}.{cents:02}", group_thousands(whole))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Magnitude compression for large prices and amounts: millions get an `M`
/// suffix, thousands a `K` suffix, everything else plain two decimals.
pub fn compress(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let value = value.abs();

    if value >= 1_000_000.0 {
        format!("{sign}{:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{sign}{:.2}K", value / 1_000.0)
    } else {
        format!("{sign}{value:.2}")
    }
}

/// Fixed 6-decimal amounts for fungible tokens, integers for NFTs.
pub fn format_token_amount(amount: f64, is_nft: bool) -> String {
    if is_nft {
        format!("{}", amount as i64)
    } else {
        format!("{amount:.6}")
    }
}

/// Coarse relative age of an epoch-seconds timestamp.
pub fn relative_age(time_at: i64, now: DateTime<Utc>) -> String {
    let elapsed = now.timestamp() - time_at;
    if elapsed < 60 {
        return "just now".to_string();
    }
    let minutes = elapsed / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    format!("{}d ago", hours / 24)
}
