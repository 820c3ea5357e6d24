//! The bot store contract and its two backends.
//!
//! Route handlers only see `Arc<dyn BotStore>`, so the in-memory backend can
//! stand in for the SQL one in tests and in database-less deployments.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use swoosh_common::{
    error::{SwooshError, SwooshResult},
    models::bot::{Bot, NewBot},
    slug::slugify,
};

use crate::{repository::bots, Database};

/// Create-only storage of bot records.
///
/// Tokens are unique: creating a second bot for a token that already owns
/// one fails with [`SwooshError::AlreadyExists`].
#[async_trait]
pub trait BotStore: Send + Sync {
    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;

    async fn get_bot(&self, id: i64) -> SwooshResult<Option<Bot>>;

    async fn get_bot_by_token(&self, token: &str) -> SwooshResult<Option<Bot>>;

    /// Persist a new bot, assigning its `id` and `created_at`.
    async fn create_bot(&self, new: NewBot) -> SwooshResult<Bot>;

    /// Every bot, ascending by id.
    async fn list_bots(&self) -> SwooshResult<Vec<Bot>>;

    /// Find the bot whose name slugifies to the same slug as `name`.
    ///
    /// Scans the whole table; when two bots share a slug the older one wins.
    async fn find_by_slug(&self, name: &str) -> SwooshResult<Option<Bot>> {
        let wanted = slugify(name);
        if wanted.is_empty() {
            return Ok(None);
        }
        Ok(self
            .list_bots()
            .await?
            .into_iter()
            .find(|bot| bot.slug() == wanted))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

fn duplicate_token() -> SwooshError {
    SwooshError::AlreadyExists {
        resource: "A bot for this token".into(),
    }
}

// ============================================================================
// In-memory backend
// ============================================================================

#[derive(Debug)]
struct MemoryState {
    bots: BTreeMap<i64, Bot>,
    next_id: i64,
}

/// Process-local store. Data is lost when the process exits.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                bots: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BotStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get_bot(&self, id: i64) -> SwooshResult<Option<Bot>> {
        Ok(self.state.read().await.bots.get(&id).cloned())
    }

    async fn get_bot_by_token(&self, token: &str) -> SwooshResult<Option<Bot>> {
        let state = self.state.read().await;
        Ok(state.bots.values().find(|b| b.token == token).cloned())
    }

    async fn create_bot(&self, new: NewBot) -> SwooshResult<Bot> {
        let mut state = self.state.write().await;
        if state.bots.values().any(|b| b.token == new.token) {
            return Err(duplicate_token());
        }

        let id = state.next_id;
        state.next_id += 1;

        let bot = Bot {
            id,
            token: new.token,
            name: new.name,
            server_link: new.server_link,
            logo_url: new.logo_url,
            website_url: new.website_url,
            created_at: Utc::now(),
        };
        state.bots.insert(id, bot.clone());
        Ok(bot)
    }

    async fn list_bots(&self) -> SwooshResult<Vec<Bot>> {
        Ok(self.state.read().await.bots.values().cloned().collect())
    }
}

// ============================================================================
// SQL backend
// ============================================================================

/// Durable store over the `bots` table.
#[derive(Clone)]
pub struct SqlStore {
    db: Database,
}

impl SqlStore {
    /// Wrap an already-migrated database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BotStore for SqlStore {
    fn backend(&self) -> &'static str {
        "sql"
    }

    async fn get_bot(&self, id: i64) -> SwooshResult<Option<Bot>> {
        Ok(bots::get_bot(&self.db.pool, id).await?)
    }

    async fn get_bot_by_token(&self, token: &str) -> SwooshResult<Option<Bot>> {
        Ok(bots::get_bot_by_token(&self.db.pool, token).await?)
    }

    async fn create_bot(&self, new: NewBot) -> SwooshResult<Bot> {
        if bots::get_bot_by_token(&self.db.pool, &new.token)
            .await?
            .is_some()
        {
            return Err(duplicate_token());
        }

        // The UNIQUE constraint still catches two concurrent creates.
        bots::create_bot(&self.db.pool, &new, Utc::now())
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    duplicate_token()
                }
                other => other.into(),
            })
    }

    async fn list_bots(&self) -> SwooshResult<Vec<Bot>> {
        Ok(bots::list_bots(&self.db.pool).await?)
    }

    async fn health_check(&self) -> bool {
        self.db.health_check().await
    }
}
