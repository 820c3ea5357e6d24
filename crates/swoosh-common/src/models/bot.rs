//! Bot record and the request/response shapes built around it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::slug::{is_routable, slugify};

/// A generated bot website record. Create-only: never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    /// Auto-increment primary key, assigned by the store.
    pub id: i64,

    /// Discord bot token exactly as the user pasted it.
    #[serde(skip_serializing)]
    pub token: String,

    /// Display name; also the basis for the URL slug.
    pub name: String,

    /// Discord invite link.
    pub server_link: String,

    /// Public path of the uploaded logo (`/uploads/...`), if any.
    pub logo_url: Option<String>,

    /// Fully-qualified public page URL, fixed at creation.
    pub website_url: String,

    /// Assigned by the store at creation.
    pub created_at: DateTime<Utc>,
}

impl Bot {
    /// Slug of this bot's name, as used in its public URL.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Fields supplied when creating a bot. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewBot {
    pub token: String,
    pub name: String,
    pub server_link: String,
    pub logo_url: Option<String>,
    pub website_url: String,
}

// ============================================================================
// Requests
// ============================================================================

/// `POST /api/bots/verify-token` body. A missing token deserializes as empty
/// so it is reported as a validation failure rather than a body rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyTokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Text fields of the multipart `POST /api/bots/generate` form.
#[derive(Debug, Default, Validate)]
pub struct GenerateBotRequest {
    #[validate(
        length(min = 1, max = 100, message = "Bot name is required (max 100 characters)"),
        custom(function = "validate_sluggable")
    )]
    pub name: String,

    #[validate(
        url(message = "Valid server link is required"),
        custom(function = "validate_web_link")
    )]
    pub server_link: String,
}

fn validate_sluggable(name: &str) -> Result<(), ValidationError> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(ValidationError::new("blank_name")
            .with_message("Bot name cannot be whitespace only".into()));
    }
    if !is_routable(&slug) {
        return Err(ValidationError::new("unroutable_name").with_message(
            "Bot name is reserved or contains /, \\, ?, # or %".into(),
        ));
    }
    Ok(())
}

/// Invite links end up in `href` attributes, so only web schemes are allowed.
fn validate_web_link(link: &str) -> Result<(), ValidationError> {
    let lower = link.trim_start().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return Ok(());
    }
    Err(ValidationError::new("web_link")
        .with_message("Server link must start with http:// or https://".into()))
}

// ============================================================================
// Responses
// ============================================================================

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returned by verify-token. The session token is also set as a cookie.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub message: String,
    pub session_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBotResponse {
    pub id: i64,
    pub name: String,
    pub website_url: String,
}

impl From<Bot> for GenerateBotResponse {
    fn from(b: Bot) -> Self {
        Self {
            id: b.id,
            name: b.name,
            website_url: b.website_url,
        }
    }
}

/// What the wizard's success page shows about the session's bot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotInfo {
    pub name: String,
    pub server_link: String,
    pub logo_url: Option<String>,
    pub website_url: String,
}

impl From<Bot> for BotInfo {
    fn from(b: Bot) -> Self {
        Self {
            name: b.name,
            server_link: b.server_link,
            logo_url: b.logo_url,
            website_url: b.website_url,
        }
    }
}

/// A command advertised on a bot's public page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BotCommand {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every generated bot advertises the same moderation commands.
pub const BOT_COMMANDS: [BotCommand; 3] = [
    BotCommand {
        name: "!kick",
        description: "Kick a member from the server",
    },
    BotCommand {
        name: "!ban",
        description: "Ban a member from the server",
    },
    BotCommand {
        name: "!mute",
        description: "Mute a member in the server",
    },
];

/// Public website data for a bot, looked up by slug.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotWebsite {
    pub id: i64,
    pub name: String,
    pub server_link: String,
    pub logo_url: Option<String>,
    pub commands: &'static [BotCommand],
}

impl From<Bot> for BotWebsite {
    fn from(b: Bot) -> Self {
        Self {
            id: b.id,
            name: b.name,
            server_link: b.server_link,
            logo_url: b.logo_url,
            commands: &BOT_COMMANDS,
        }
    }
}
