//! Name extraction from LinkedIn-style profile URLs.

use crate::core::models::PersonName;
use url::Url;

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Last non-empty path segment of a profile URL. Falls back to plain string
/// splitting when the input does not parse as an absolute URL.
fn profile_slug(profile_url: &str) -> String {
    let trimmed = profile_url.trim();
    if let Ok(url) = Url::parse(trimmed) {
        if let Some(segments) = url.path_segments() {
            if let Some(last) = segments.filter(|s| !s.is_empty()).last() {
                return last.to_string();
            }
        }
        return String::new();
    }
    trimmed
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
        .to_string()
}

/// Derives a person's name from the profile slug: the slug is split on `-`,
/// the first part becomes the first name and the second part (if any) the
/// last name, both capitalized. Anything after the second part is ignored.
pub fn extract_name(profile_url: &str) -> PersonName {
    let slug = profile_slug(profile_url);
    let mut parts = slug.split('-');
    let first = parts.next().map(capitalize).unwrap_or_default();
    let last = parts.next().map(capitalize).unwrap_or_default();
    tracing::trace!("Extracted name '{} {}' from '{}'", first, last, profile_url);
    PersonName { first, last }
}
