//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > config.toml > defaults

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;

/// Load the application configuration from all sources.
///
/// Should be called once at application startup; the result is handed to the
/// API state rather than stored globally.
pub fn init() -> Result<AppConfig, ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    with_defaults(config::Config::builder())?
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (SWOOSH_SERVER__PORT, SWOOSH_DATABASE__URL, etc.)
        .add_source(environment())
        .build()?
        .try_deserialize()
}

/// `SWOOSH_` prefix, then `__` between nested keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix("SWOOSH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Configuration built from defaults only, ignoring files and environment.
pub fn defaults() -> Result<AppConfig, ConfigError> {
    with_defaults(config::Config::builder())?
        .build()?
        .try_deserialize()
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("server.public_url", "http://localhost:8080")?
        .set_default("database.max_connections", 10)?
        .set_default("database.min_connections", 1)?
        .set_default("auth.session_ttl_secs", 3600)? // 1 hour
        .set_default("uploads.dir", "./uploads")?
        .set_default("uploads.max_logo_bytes", 1_048_576)? // 1 MiB
        .set_default("wizard.initialize_delay_ms", 3000)
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadsConfig,
    pub wizard: WizardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin that generated bot websites live under, e.g. `https://bots.example.com`.
    /// A bot named "Night Owl" gets `{public_url}/nightowl`.
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// `sqlite://…` or `postgres://…` URL. Unset means the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 secret used to sign wizard session tokens.
    /// When unset a random secret is generated per process.
    pub session_secret: Option<String>,
    /// Session token TTL in seconds
    pub session_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    /// Local directory uploaded logos are written to.
    pub dir: String,
    pub max_logo_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WizardConfig {
    /// How long the loading page lingers after a successful initialize call.
    pub initialize_delay_ms: u64,
}
