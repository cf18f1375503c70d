//! The stats proxy route.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use walletstats_common::error::AppError;

use crate::state::AppState;
use crate::upstream;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats/proxy", get(proxy_stats))
}

/// GET /api/stats/proxy?endpoint=<name>&<params> — forward a whitelisted
/// read request to the upstream wallet-data API.
///
/// The `endpoint` key selects the upstream path; all remaining query
/// parameters are forwarded verbatim, in order. A missing or unrecognized
/// endpoint is rejected without touching the upstream.
async fn proxy_stats(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let endpoint = params
        .iter()
        .find(|(key, _)| key == "endpoint")
        .map(|(_, value)| value.clone())
        .filter(|endpoint| upstream::is_allowed(endpoint))
        .ok_or(AppError::InvalidEndpoint)?;

    let forwarded: Vec<(String, String)> = params
        .into_iter()
        .filter(|(key, _)| key != "endpoint")
        .collect();

    let data = upstream::forward(&state, &endpoint, &forwarded).await?;
    Ok(Json(data))
}
