pub mod health;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the complete proxy router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(stats::router())
        .with_state(state)
}
