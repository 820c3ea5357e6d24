//! Core domain models shared across all Swoosh crates.
//!
//! These are the "truth" types: what the store persists and the API serializes.

pub mod bot;

pub use bot::*;
