use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Endpoint missing or outside the proxy allow-list.
    #[error("Invalid endpoint")]
    InvalidEndpoint,

    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream API answered with a non-success status. The body is
    /// carried verbatim for diagnostics.
    #[error("Upstream API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsed as HTTP-success but had an unexpected shape.
    /// Raised by the dashboard aggregator, never served over HTTP.
    #[error("{0}")]
    Payload(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidEndpoint => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Upstream { .. } => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Http(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Payload(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
