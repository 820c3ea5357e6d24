//! Input validation utilities.
//!
//! Centralized validation helpers used across API routes.

use validator::Validate;

use crate::error::SwooshError;

/// Validate a request body, returning a SwooshError::Validation on failure.
pub fn validate_request<T: Validate>(body: &T) -> Result<(), SwooshError> {
    body.validate().map_err(|e| SwooshError::Validation {
        message: format_validation_errors(e),
    })
}

/// Format validation errors into a human-readable string.
fn format_validation_errors(errors: validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Logo uploads must be one of the common web image formats.
pub fn is_allowed_logo_type(content_type: &str) -> bool {
    matches!(
        content_type,
        "image/jpeg" | "image/png" | "image/gif" | "image/webp" | "image/svg+xml" | "image/avif"
    )
}

/// Reduce an uploaded filename to something that is safe on disk and as a
/// single URL path segment: no separators, whitespace, URL syntax or `..`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0' | '?' | '#' | '%'))
        .filter(|c| !c.is_whitespace())
        .collect();
    while out.contains("..") {
        out = out.replace("..", ".");
    }
    out.chars().take(128).collect()
}
