//! Integration tests for the proxy gateway routes.
//!
//! Uses `tower::ServiceExt` to drive the Axum router without a real HTTP
//! server, plus a fake upstream bound to 127.0.0.1:0 to observe what the
//! gateway actually sends outbound.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceExt;

use walletstats_common::config::AppConfig;
use walletstats_gateway::routes::create_router;
use walletstats_gateway::state::AppState;

// ============================================================
// Helpers
// ============================================================

fn test_config(upstream_base_url: &str, access_key: Option<&str>) -> AppConfig {
    AppConfig {
        upstream_base_url: upstream_base_url.to_string(),
        access_key: access_key.map(str::to_string),
        gateway_port: 3000,
        gateway_base_url: "http://127.0.0.1:3000".to_string(),
        wallet_address: "0xddc23d34ea2f6920d15995607d00def9478ded6d".to_string(),
        chain_id: "base".to_string(),
        refresh_interval_secs: 30,
        history_page_count: 20,
    }
}

/// Fake upstream echoing the query string and access key it received.
async fn echo_balance(
    State(hits): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    let access_key = headers
        .get("AccessKey")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({
        "received_query": query.unwrap_or_default(),
        "received_access_key": access_key,
    }))
}

/// Fake upstream route that always fails.
async fn always_not_found(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, Json<Value>) {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "address not found" })),
    )
}

/// Spawn the fake upstream and return its base URL plus a hit counter.
async fn spawn_upstream() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/user/total_balance", get(echo_balance))
        .route("/user/history_list", get(always_not_found))
        .with_state(Arc::clone(&hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================
// Route tests
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let state = AppState::new(test_config("http://unused", Some("test-key")));
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "walletstats-gateway");
}

#[tokio::test]
async fn test_unknown_endpoint_rejected_without_outbound_call() {
    let (base, hits) = spawn_upstream().await;
    let state = AppState::new(test_config(&base, Some("test-key")));
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats/proxy?endpoint=user/delete_account&id=0xabc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid endpoint");
    assert_eq!(hits.load(Ordering::SeqCst), 0, "no outbound call expected");
}

#[tokio::test]
async fn test_missing_endpoint_rejected() {
    let (base, hits) = spawn_upstream().await;
    let state = AppState::new(test_config(&base, Some("test-key")));
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats/proxy?id=0xabc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid endpoint");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_access_key_is_config_error() {
    let (base, hits) = spawn_upstream().await;
    let state = AppState::new(test_config(&base, None));
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats/proxy?endpoint=user/total_balance&id=0xabc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("DEBANK_ACCESS_KEY"),
        "error should name the missing credential, got {json}"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0, "no outbound call expected");
}

#[tokio::test]
async fn test_forward_strips_endpoint_and_attaches_access_key() {
    let (base, hits) = spawn_upstream().await;
    let state = AppState::new(test_config(&base, Some("test-key")));
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats/proxy?endpoint=user/total_balance&id=0xabc&chain_id=base")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["received_query"], "id=0xabc&chain_id=base");
    assert_eq!(json["received_access_key"], "test-key");
    assert_eq!(hits.load(Ordering::SeqCst), 1, "exactly one outbound call");
}

#[tokio::test]
async fn test_upstream_failure_surfaces_as_500_with_detail() {
    let (base, _hits) = spawn_upstream().await;
    let state = AppState::new(test_config(&base, Some("test-key")));
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats/proxy?endpoint=user/history_list&id=0xabc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("404"), "upstream status embedded: {message}");
    assert!(
        message.contains("address not found"),
        "upstream body embedded: {message}"
    );
}
