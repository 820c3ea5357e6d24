//! Wizard sessions: signed, stateless, one per browser.
//!
//! `verify-token` hands out an HS256 JWT carrying the pasted bot token. Every
//! later wizard call presents it (cookie or bearer header), so two people
//! running the wizard at once never see each other's bot.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use swoosh_common::config::AuthConfig;

/// Cookie the browser keeps the session token in.
pub const SESSION_COOKIE: &str = "swoosh_session";

/// JWT claims embedded in session tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// The Discord bot token this session is building a page for
    pub bot_token: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Signing material plus TTL for session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl SessionKeys {
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Keys from config, or a random per-process secret when none is set.
    pub fn from_config(config: &AuthConfig) -> Self {
        match config.session_secret.as_deref() {
            Some(secret) if !secret.is_empty() => Self::new(secret.as_bytes(), config.session_ttl_secs),
            _ => {
                tracing::warn!(
                    "auth.session_secret is not set; using a random secret (sessions end on restart)"
                );
                let mut bytes = [0u8; 32];
                rand::rng().fill_bytes(&mut bytes);
                Self::new(hex::encode(bytes).as_bytes(), config.session_ttl_secs)
            }
        }
    }

    /// Issue a session token for a bot token.
    pub fn issue(&self, bot_token: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            bot_token: bot_token.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs as i64)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Validate and decode a session token.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
