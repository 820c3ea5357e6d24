//! Health check endpoint for load balancers and uptime monitors.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    /// Store backend in use ("memory" or "sql").
    store: &'static str,
    /// Seconds since the router was built.
    uptime: u64,
}

/// Health check router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_ok = state.store.health_check().await;

    Json(HealthResponse {
        status: if store_ok { "ok" } else { "degraded" },
        service: "swoosh",
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.backend(),
        uptime: state.started_at.elapsed().as_secs(),
    })
}
