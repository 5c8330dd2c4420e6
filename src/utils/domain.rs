//! Utility functions for handling domain names and URLs.

use crate::core::error::{AppError, Result};
use url::Url;

/// Extracts the base domain name (e.g., "example.com") from a given URL or domain string.
///
/// Handles common variations:
/// - Adds `https://` scheme if missing.
/// - Extracts the host and removes a `www.` prefix.
/// - Converts to lowercase.
///
/// Returns `Err(AppError::DomainExtraction)` if the input is empty or a host cannot be parsed.
pub(crate) fn get_domain_from_url(website_url_or_domain: &str) -> Result<String> {
    let trimmed_input = website_url_or_domain.trim();
    if trimmed_input.is_empty() {
        return Err(AppError::DomainExtraction(
            "Input string is empty".to_string(),
        ));
    }

    let url_str_with_scheme = if !trimmed_input.contains("://") {
        format!("https://{}", trimmed_input)
    } else {
        trimmed_input.to_string()
    };

    let url = Url::parse(&url_str_with_scheme)?;
    let host = url.host_str().ok_or_else(|| {
        AppError::DomainExtraction(format!("Could not extract host from parsed URL: {}", url))
    })?;

    let final_domain = host.strip_prefix("www.").unwrap_or(host).to_lowercase();

    if !final_domain.contains('.') || final_domain.starts_with('.') || final_domain.ends_with('.') {
        return Err(AppError::DomainExtraction(format!(
            "Extracted domain appears invalid: {}",
            final_domain
        )));
    }
    Ok(final_domain)
}

/// Cleans a domain reported by a resolver. Values that do not look like a
/// domain are passed through trimmed rather than dropped.
pub(crate) fn clean_resolved_domain(raw: &str) -> String {
    match get_domain_from_url(raw) {
        Ok(domain) => domain,
        Err(e) => {
            tracing::debug!("Keeping resolver domain '{}' as-is: {}", raw, e);
            raw.trim().to_string()
        }
    }
}

/// Parses a profile URL into a `Url`, adding `https://` if the scheme is missing.
pub(crate) fn normalize_url(website_url_str: &str) -> Result<Url> {
    let trimmed_input = website_url_str.trim();
    if trimmed_input.is_empty() {
        return Err(AppError::MalformedInput("URL input is empty".to_string()));
    }

    let url_str_with_scheme = if !trimmed_input.contains("://") {
        format!("https://{}", trimmed_input)
    } else {
        trimmed_input.to_string()
    };

    let url = Url::parse(&url_str_with_scheme)?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::UrlParse(url::ParseError::EmptyHost));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_domain_from_url_valid() {
        assert_eq!(
            get_domain_from_url("https://www.example.com").unwrap(),
            "example.com"
        );
        assert_eq!(get_domain_from_url("example.com").unwrap(), "example.com");
        assert_eq!(
            get_domain_from_url("https://EXAMPLE.com/path?query=1").unwrap(),
            "example.com"
        );
        assert_eq!(
            get_domain_from_url(" sub.domain.example.co.uk ").unwrap(),
            "sub.domain.example.co.uk"
        );
    }

    #[test]
    fn test_get_domain_from_url_invalid() {
        assert!(get_domain_from_url("").is_err());
        assert!(get_domain_from_url("https://").is_err());
        assert!(get_domain_from_url("example").is_err());
        assert!(get_domain_from_url("https://example.").is_err());
    }

    #[test]
    fn test_clean_resolved_domain() {
        assert_eq!(clean_resolved_domain("WWW.Stripe.com"), "stripe.com");
        assert_eq!(clean_resolved_domain("  localhost "), "localhost");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("linkedin.com/in/john-doe").unwrap().as_str(),
            "https://linkedin.com/in/john-doe"
        );
        assert!(normalize_url("").is_err());
        assert!(normalize_url("https://").is_err());
    }
}
