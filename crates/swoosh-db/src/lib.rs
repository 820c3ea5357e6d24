//! # swoosh-db
//!
//! Storage layer for Swoosh. Bot records live behind the [`BotStore`] trait
//! with two interchangeable backends:
//! - **memory**: a process-local map, lost on restart
//! - **sql**: SQLite or PostgreSQL through `sqlx::AnyPool`
//!
//! Uploaded logos are plain files on local disk, see [`storage::LogoStorage`].

pub mod any_compat;
pub mod repository;
pub mod storage;
pub mod store;

pub use store::{BotStore, MemoryStore, SqlStore};

use anyhow::Result;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use swoosh_common::config::DatabaseConfig;

/// SQL connection pool shared by the SQL store.
#[derive(Clone)]
pub struct Database {
    pub pool: AnyPool,
    dialect: Dialect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Sqlite,
    Postgres,
}

impl Database {
    /// Connect using the configured URL.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("database.url is not set"))?;
        Self::connect_url(url, config.max_connections, config.min_connections).await
    }

    /// Connect to a `sqlite:` or `postgres:` URL.
    pub async fn connect_url(url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        sqlx::any::install_default_drivers();

        let dialect = if url.starts_with("postgres") {
            Dialect::Postgres
        } else if url.starts_with("sqlite") {
            Dialect::Sqlite
        } else {
            anyhow::bail!("unsupported database URL scheme (expected sqlite: or postgres:)");
        };

        // Every connection to `sqlite::memory:` opens its own empty database,
        // so the pool must hold exactly one connection for its whole life.
        let in_memory = url.contains(":memory:");
        let mut options = AnyPoolOptions::new();
        if in_memory {
            options = options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options
                .max_connections(max_connections)
                .min_connections(min_connections);
        }

        tracing::info!(?dialect, in_memory, "Connecting to database...");
        let pool = options.connect(url).await?;
        tracing::info!("Connected to database");

        Ok(Self { pool, dialect })
    }

    /// Run database migrations for the connected dialect.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");
        match self.dialect {
            Dialect::Sqlite => sqlx::migrate!("./migrations/sqlite").run(&self.pool).await?,
            Dialect::Postgres => sqlx::migrate!("./migrations/postgres").run(&self.pool).await?,
        }
        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Health check: verify the database is reachable.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
