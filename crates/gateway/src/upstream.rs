//! Outbound call to the upstream wallet-data API.

use reqwest::header;

use walletstats_common::error::AppError;

use crate::state::AppState;

/// Logical endpoints the proxy is willing to forward. Anything else is
/// rejected before an outbound call is made.
pub const ALLOWED_ENDPOINTS: [&str; 5] = [
    "user/total_balance",
    "user/history_list",
    "token/balance_list",
    "user/complex_protocol_list",
    "user/token_list",
];

/// Header carrying the server-held upstream credential.
pub const ACCESS_KEY_HEADER: &str = "AccessKey";

pub fn is_allowed(endpoint: &str) -> bool {
    ALLOWED_ENDPOINTS.contains(&endpoint)
}

/// Join the upstream base with an endpoint path.
pub fn upstream_url(base: &str, endpoint: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), endpoint)
}

/// Issue exactly one GET against the upstream API and relay its JSON body.
///
/// Every inbound proxy call maps to one outbound call: no retry, no
/// caching. `params` is the inbound query with the `endpoint` key already
/// stripped.
pub async fn forward(
    state: &AppState,
    endpoint: &str,
    params: &[(String, String)],
) -> Result<serde_json::Value, AppError> {
    let access_key = state
        .config
        .access_key
        .as_deref()
        .ok_or_else(|| AppError::Config("DEBANK_ACCESS_KEY is not configured".to_string()))?;

    let url = upstream_url(&state.config.upstream_base_url, endpoint);
    tracing::debug!(%url, "Forwarding stats request upstream");

    let response = state
        .http
        .get(&url)
        .query(params)
        .header(header::ACCEPT, "application/json")
        .header(ACCESS_KEY_HEADER, access_key)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        // Carry the upstream body so failures are diagnosable from the
        // proxy response alone.
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Upstream API returned an error");
        return Err(AppError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_the_five_known_endpoints() {
        for endpoint in ALLOWED_ENDPOINTS {
            assert!(is_allowed(endpoint), "{endpoint} should be allowed");
        }
    }

    #[test]
    fn allow_list_rejects_everything_else() {
        assert!(!is_allowed("user/delete_account"));
        assert!(!is_allowed("user/total_balance/extra"));
        assert!(!is_allowed(""));
    }

    #[test]
    fn upstream_url_joins_base_and_path() {
        assert_eq!(
            upstream_url("https://pro-openapi.debank.com/v1", "user/total_balance"),
            "https://pro-openapi.debank.com/v1/user/total_balance"
        );
        // Trailing slash on the base must not double up
        assert_eq!(
            upstream_url("https://pro-openapi.debank.com/v1/", "user/token_list"),
            "https://pro-openapi.debank.com/v1/user/token_list"
        );
    }
}
