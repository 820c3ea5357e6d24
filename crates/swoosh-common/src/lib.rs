//! # swoosh-common
//!
//! Shared types, configuration, error handling, and utilities used across all Swoosh crates.
//! This is the foundation layer: no I/O and no HTTP routing, just primitives and contracts.

pub mod config;
pub mod error;
pub mod models;
pub mod slug;
pub mod validation;
