//! # swoosh-api
//!
//! HTTP layer for Swoosh. Serves the JSON API under `/api`, the four wizard
//! pages, uploaded logos, and each generated bot's public page at `/{slug}`.

pub mod auth;
pub mod middleware;
pub mod pages;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use swoosh_common::config::AppConfig;
use swoosh_db::{storage::LogoStorage, BotStore};

use crate::auth::SessionKeys;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Bot records, in memory or in SQL depending on configuration.
    pub store: Arc<dyn BotStore>,
    /// Local-disk store for uploaded logos.
    pub logos: LogoStorage,
    /// Signs and verifies wizard session tokens.
    pub sessions: SessionKeys,
    pub config: Arc<AppConfig>,
    /// When the router was built, for `/api/health` uptime.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn BotStore>) -> Self {
        Self {
            store,
            logos: LogoStorage::new(&config.uploads.dir),
            sessions: SessionKeys::from_config(&config.auth),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let state = Arc::new(state);

    let api_routes = Router::new()
        .merge(routes::bots::router(state.clone()))
        .merge(routes::health::router())
        .fallback(routes::api_not_found);

    Router::new()
        .nest("/api", api_routes)
        .merge(routes::files::router())
        .merge(routes::pages::router())
        .fallback(routes::pages::not_found)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::compression::CompressionLayer::new())
        .with_state(state)
}
