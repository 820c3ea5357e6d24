//! Bot wizard API.
//!
//! | Route                               | Session | Purpose                          |
//! |-------------------------------------|---------|----------------------------------|
//! | `POST /api/bots/verify-token`       | no      | start a session for a bot token  |
//! | `POST /api/bots/initialize`         | yes     | "initialize" the bot             |
//! | `POST /api/bots/generate`           | yes     | create the bot website           |
//! | `GET  /api/bots/info`               | yes     | the session's bot                |
//! | `GET  /api/bots/website/{bot_name}` | no      | public website data by name      |

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, DefaultBodyLimit, Extension, Multipart, Path, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use std::sync::Arc;
use swoosh_common::{
    error::{SwooshError, SwooshResult},
    models::bot::{
        BotInfo, BotWebsite, GenerateBotRequest, GenerateBotResponse, MessageResponse, NewBot,
        VerifyTokenRequest, VerifyTokenResponse,
    },
    slug::{slugify, website_url},
    validation::{is_allowed_logo_type, validate_request},
};

use crate::{auth::SESSION_COOKIE, middleware::SessionContext, AppState};

/// Room for the text fields and multipart framing around a full-size logo.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Bot wizard routes.
pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let body_limit = state.config.uploads.max_logo_bytes + FORM_OVERHEAD_BYTES;

    let session_routes = Router::new()
        .route("/bots/initialize", post(initialize))
        .route(
            "/bots/generate",
            post(generate).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/bots/info", get(info))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::session_middleware,
        ));

    Router::new()
        .route("/bots/verify-token", post(verify_token))
        .route("/bots/website/{bot_name}", get(website))
        .merge(session_routes)
}

// ============================================================================
// Wizard steps
// ============================================================================

/// POST /api/bots/verify-token: accept any non-empty token and open a session.
///
/// No call to Discord is made; the token is only carried forward so the bot
/// created in the generate step can be tied to it.
async fn verify_token(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: Result<Json<VerifyTokenRequest>, JsonRejection>,
) -> SwooshResult<(CookieJar, Json<VerifyTokenResponse>)> {
    let Json(body) = body.map_err(|e| SwooshError::validation(e.body_text()))?;
    validate_request(&body)?;

    let session_token = state
        .sessions
        .issue(&body.token)
        .map_err(|e| SwooshError::Internal(e.into()))?;

    let cookie = Cookie::build((SESSION_COOKIE, session_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!("Bot token accepted, session issued");

    Ok((
        jar.add(cookie),
        Json(VerifyTokenResponse {
            message: "Token verified successfully".into(),
            session_token,
        }),
    ))
}

/// POST /api/bots/initialize: succeeds for any session.
async fn initialize(Extension(_session): Extension<SessionContext>) -> Json<MessageResponse> {
    tracing::debug!("Bot initialization requested");
    Json(MessageResponse::new("Bot initialized successfully"))
}

/// POST /api/bots/generate: create the session's bot and its website.
///
/// Form fields:
/// - `name`: bot display name (required)
/// - `serverLink`: Discord invite URL (required)
/// - `logo`: image file up to the configured size (optional)
async fn generate(
    Extension(session): Extension<SessionContext>,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> SwooshResult<Json<GenerateBotResponse>> {
    let max_logo = state.config.uploads.max_logo_bytes;
    let mut form = GenerateBotRequest::default();
    let mut logo: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e))? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("name") => {
                form.name = field.text().await.map_err(|e| multipart_error(&e))?;
            }
            Some("serverLink") => {
                form.server_link = field.text().await.map_err(|e| multipart_error(&e))?;
            }
            Some("logo") => {
                let filename = field.file_name().unwrap_or("logo").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;

                // Browsers send an empty part when no file was picked.
                if bytes.is_empty() {
                    continue;
                }
                if bytes.len() > max_logo {
                    return Err(SwooshError::validation(format!(
                        "Logo too large: {} bytes (max {} bytes)",
                        bytes.len(),
                        max_logo
                    )));
                }
                if !is_allowed_logo_type(&content_type) {
                    return Err(SwooshError::validation(format!(
                        "Logo type '{content_type}' is not allowed"
                    )));
                }
                logo = Some((filename, bytes));
            }
            _ => {} // Ignore unknown fields
        }
    }

    validate_request(&form)?;

    // Refuse before touching the disk; the store re-checks on insert.
    if state.store.get_bot_by_token(&session.bot_token).await?.is_some() {
        return Err(SwooshError::AlreadyExists {
            resource: "A bot for this token".into(),
        });
    }

    let logo_url = match logo {
        Some((filename, bytes)) => Some(state.logos.put_logo(&filename, &bytes).await?),
        None => None,
    };

    let created = state
        .store
        .create_bot(NewBot {
            token: session.bot_token,
            website_url: website_url(&state.config.server.public_url, &form.name),
            name: form.name,
            server_link: form.server_link,
            logo_url: logo_url.clone(),
        })
        .await;

    let bot = match created {
        Ok(bot) => bot,
        Err(e) => {
            // No record points at the logo, so it must not outlive the request.
            if let Some(path) = logo_url {
                if let Err(rm) = state.logos.remove(&path).await {
                    tracing::warn!(path = %path, error = %rm, "Failed to remove orphaned logo");
                }
            }
            return Err(e);
        }
    };

    tracing::info!(bot_id = bot.id, slug = %bot.slug(), "Generated bot website");

    Ok(Json(bot.into()))
}

/// GET /api/bots/info: the bot created by this session.
async fn info(
    Extension(session): Extension<SessionContext>,
    State(state): State<Arc<AppState>>,
) -> SwooshResult<Json<BotInfo>> {
    let bot = state
        .store
        .get_bot_by_token(&session.bot_token)
        .await?
        .ok_or_else(|| SwooshError::not_found("Bot"))?;

    Ok(Json(bot.into()))
}

// ============================================================================
// Public lookup
// ============================================================================

/// GET /api/bots/website/{bot_name}: public data for a bot, matched by slug.
async fn website(
    State(state): State<Arc<AppState>>,
    Path(bot_name): Path<String>,
) -> SwooshResult<Json<BotWebsite>> {
    tracing::debug!(slug = %slugify(&bot_name), "Website lookup");

    let bot = state
        .store
        .find_by_slug(&bot_name)
        .await?
        .ok_or_else(|| SwooshError::not_found("Bot"))?;

    Ok(Json(bot.into()))
}

fn multipart_error(e: &axum::extract::multipart::MultipartError) -> SwooshError {
    SwooshError::validation(format!("Multipart error: {}", e.body_text()))
}
