//! Bot repository: SQL queries over the `bots` table.
//!
//! Placeholders are numbered (`$1`, `$2`, …) and used in order, which both
//! PostgreSQL and SQLite accept through the Any driver.

use chrono::{DateTime, Utc};
use sqlx::{any::AnyRow, AnyPool, Row};

use swoosh_common::models::bot::{Bot, NewBot};

use crate::any_compat::{format_datetime, get_datetime};

const COLUMNS: &str = "id, token, name, server_link, logo_url, website_url, created_at";

fn row_to_bot(row: &AnyRow) -> Result<Bot, sqlx::Error> {
    Ok(Bot {
        id: row.try_get("id")?,
        token: row.try_get("token")?,
        name: row.try_get("name")?,
        server_link: row.try_get("server_link")?,
        logo_url: row.try_get("logo_url")?,
        website_url: row.try_get("website_url")?,
        created_at: get_datetime(row, "created_at")?,
    })
}

pub async fn get_bot(pool: &AnyPool, id: i64) -> Result<Option<Bot>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM bots WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(row_to_bot).transpose()
}

pub async fn get_bot_by_token(pool: &AnyPool, token: &str) -> Result<Option<Bot>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM bots WHERE token = $1 ORDER BY id LIMIT 1"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_bot).transpose()
}

/// All bots, oldest first.
pub async fn list_bots(pool: &AnyPool) -> Result<Vec<Bot>, sqlx::Error> {
    let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM bots ORDER BY id"))
        .fetch_all(pool)
        .await?;
    rows.iter().map(row_to_bot).collect()
}

pub async fn create_bot(
    pool: &AnyPool,
    new: &NewBot,
    created_at: DateTime<Utc>,
) -> Result<Bot, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"INSERT INTO bots (token, name, server_link, logo_url, website_url, created_at)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id"#,
    )
    .bind(&new.token)
    .bind(&new.name)
    .bind(&new.server_link)
    .bind(new.logo_url.as_deref())
    .bind(&new.website_url)
    .bind(format_datetime(&created_at))
    .fetch_one(pool)
    .await?;

    Ok(Bot {
        id,
        token: new.token.clone(),
        name: new.name.clone(),
        server_link: new.server_link.clone(),
        logo_url: new.logo_url.clone(),
        website_url: new.website_url.clone(),
        created_at,
    })
}
