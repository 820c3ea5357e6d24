//! Route modules.

pub mod bots;
pub mod files;
pub mod health;
pub mod pages;

use swoosh_common::error::SwooshError;

/// JSON 404 for unknown paths under `/api`.
pub async fn api_not_found() -> SwooshError {
    SwooshError::not_found("Route")
}
