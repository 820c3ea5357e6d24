//! URL slug derivation for bot names.
//!
//! A bot's public page lives at `{public_url}/{slug}`. The slug is the bot
//! name with every whitespace character removed and the rest lowercased, so
//! "Night Owl" and "night owl" and "NightOwl" all map to `nightowl`.

/// Derive the URL slug for a bot name.
pub fn slugify(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// First path segments already taken by the wizard, the API and static files.
pub const RESERVED_SLUGS: [&str; 6] = ["api", "assets", "loading", "setup", "success", "uploads"];

/// Whether a slug can be served as the single path segment `/{slug}`.
pub fn is_routable(slug: &str) -> bool {
    !slug.is_empty()
        && !RESERVED_SLUGS.contains(&slug)
        && !slug.contains(|c: char| matches!(c, '/' | '\\' | '?' | '#' | '%'))
}

/// Build the public website URL for a bot name under the given origin.
pub fn website_url(public_url: &str, name: &str) -> String {
    format!("{}/{}", public_url.trim_end_matches('/'), slugify(name))
}
