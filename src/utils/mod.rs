//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a display name for fuzzy lookup: lowercase, alphanumeric only.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Find the value of a `Label: value` line among newline-separated lines.
///
/// Matching is by label prefix rather than line position, so reordered or
/// missing lines degrade to `None` instead of corrupting other fields.
pub fn labeled_value<'a>(lines: &'a [&str], label: &str) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        let rest = line.trim().strip_prefix(label)?;
        Some(rest.strip_prefix(':').unwrap_or(rest).trim())
    })
}
