//! Middleware: wizard session extraction and security headers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use swoosh_common::error::SwooshError;

use crate::{auth::SESSION_COOKIE, AppState};

/// Session context extracted from the session token.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub bot_token: String,
}

/// Require a wizard session, taken from `Authorization: Bearer <token>` or
/// from the session cookie, and expose it to handlers as an extension.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, SwooshError> {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned);

    let token = bearer
        .or_else(|| jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()))
        .filter(|t| !t.is_empty())
        .ok_or(SwooshError::Unauthorized)?;

    let claims = state.sessions.validate(&token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected session token");
        SwooshError::InvalidSession
    })?;

    request.extensions_mut().insert(SessionContext {
        bot_token: claims.bot_token,
    });

    Ok(next.run(request).await)
}

// ── Security headers ──────────────────────────────────────────────────────────

/// Add security headers to every HTTP response.
///
/// The CSP only admits same-origin scripts, so page scripts ship as
/// `/assets/wizard.js` rather than inline.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let h = response.headers_mut();

    macro_rules! set {
        ($name:expr, $val:expr) => {
            if let Ok(v) = $val.parse::<axum::http::HeaderValue>() {
                h.insert($name, v);
            }
        };
    }

    set!(
        axum::http::header::HeaderName::from_static("x-content-type-options"),
        "nosniff"
    );
    set!(
        axum::http::header::HeaderName::from_static("x-frame-options"),
        "DENY"
    );
    set!(
        axum::http::header::HeaderName::from_static("referrer-policy"),
        "strict-origin-when-cross-origin"
    );
    set!(
        axum::http::header::HeaderName::from_static("content-security-policy"),
        "default-src 'self'; \
         script-src 'self'; \
         style-src 'self'; \
         img-src 'self' data: blob:; \
         connect-src 'self'; \
         frame-ancestors 'none'"
    );

    response
}
