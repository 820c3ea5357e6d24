//! HTML routes: the wizard, static assets, and bot websites at `/{bot_name}`.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Datelike;
use std::sync::Arc;
use swoosh_common::error::SwooshResult;

use crate::{
    pages::{website, wizard},
    AppState,
};

const SITE_CSS: &str = include_str!("../../assets/site.css");
const WIZARD_JS: &str = include_str!("../../assets/wizard.js");

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing))
        .route("/loading", get(loading))
        .route("/setup", get(setup))
        .route("/success", get(success))
        .route("/assets/site.css", get(site_css))
        .route("/assets/wizard.js", get(wizard_js))
        .route("/{bot_name}", get(bot_website))
}

async fn landing() -> Html<String> {
    Html(wizard::landing())
}

async fn loading(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(wizard::loading(state.config.wizard.initialize_delay_ms))
}

async fn setup(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(wizard::setup(state.config.uploads.max_logo_bytes))
}

async fn success() -> Html<String> {
    Html(wizard::success())
}

/// GET /{bot_name}: the bot's public page, or "Bot Not Found" with a 404.
async fn bot_website(
    State(state): State<Arc<AppState>>,
    Path(bot_name): Path<String>,
) -> SwooshResult<Response> {
    match state.store.find_by_slug(&bot_name).await? {
        Some(bot) => {
            tracing::debug!(bot_id = bot.id, "Rendering bot website");
            let year = chrono::Utc::now().year();
            Ok(Html(website::bot_page(&bot, year)).into_response())
        }
        None => Ok(not_found().await.into_response()),
    }
}

/// HTML 404 for anything outside `/api` that no route claims.
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(website::not_found()))
}

async fn site_css() -> impl IntoResponse {
    asset("text/css; charset=utf-8", SITE_CSS)
}

async fn wizard_js() -> impl IntoResponse {
    asset("text/javascript; charset=utf-8", WIZARD_JS)
}

fn asset(content_type: &'static str, body: &'static str) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        body,
    )
}
