//! Handles loading configuration from files and applying it to the Config struct.

use super::{Config, ConfigFile};
use anyhow::Context;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Loads configuration settings from a TOML file.
/// Internal to the builder logic.
pub(crate) fn load_config_file(file_path: &str) -> anyhow::Result<ConfigFile> {
    let path = Path::new(file_path);
    if !path.exists() || !path.is_file() {
        return Err(anyhow::anyhow!(
            "File not found or is not a file: {}",
            file_path
        ));
    }
    tracing::debug!("Attempting to read config file: {}", file_path);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", file_path))?;

    let config_file_content: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML configuration from {}", file_path))?;

    tracing::debug!("Successfully parsed configuration file: {}", file_path);
    Ok(config_file_content)
}

/// Blank strings clear an optional setting instead of setting it to "".
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Merges settings from a parsed `ConfigFile` onto a mutable `Config`.
/// Used for both file contents and builder overrides.
pub(crate) fn apply_file_config(config: &mut Config, file_config: &ConfigFile) {
    // Network
    if let Some(timeout) = file_config.network.request_timeout {
        config.request_timeout = Duration::from_secs(timeout);
    }
    if let Some(ref user_agent) = file_config.network.user_agent {
        config.user_agent = user_agent.clone();
    }
    if let Some(delay) = file_config.network.courtesy_delay_ms {
        config.courtesy_delay = Duration::from_millis(delay);
    }

    // Resolver
    if let Some(ref key) = file_config.resolver.api_key {
        config.domain_resolver_key = non_blank(key);
    }
    if let Some(endpoint) = file_config.resolver.endpoint {
        config.resolver_endpoint = endpoint;
    }
    if let Some(ref url) = file_config.resolver.autocomplete_url {
        config.clearbit_autocomplete_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(ref url) = file_config.resolver.company_url {
        config.clearbit_company_url = url.trim().trim_end_matches('/').to_string();
    }

    // Verifier
    if let Some(ref key) = file_config.verifier.api_key {
        config.verifier_key = non_blank(key);
    }
    if let Some(ref url) = file_config.verifier.base_url {
        config.hunter_url = url.trim().trim_end_matches('/').to_string();
    }

    // Scraper
    if let Some(ref ua) = file_config.scraper.user_agent {
        config.scraper_user_agent = non_blank(ua);
    }
    if let Some(ref cookie) = file_config.scraper.cookie {
        config.scraper_cookie = non_blank(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResolverEndpoint;
    use std::io::Write;

    #[test]
    fn test_load_and_apply_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[network]
request_timeout = 5
courtesy_delay_ms = 50

[resolver]
api_key = "sk_test"
endpoint = "company"
company_url = "http://localhost:9000/"

[verifier]
api_key = "   "

[scraper]
cookie = "li_at=xyz"
"#
        )
        .unwrap();

        let parsed = load_config_file(file.path().to_str().unwrap()).unwrap();
        let mut config = Config {
            verifier_key: Some("previous".to_string()),
            ..Config::default()
        };
        apply_file_config(&mut config, &parsed);

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.courtesy_delay, Duration::from_millis(50));
        assert_eq!(config.domain_resolver_key.as_deref(), Some("sk_test"));
        assert_eq!(config.resolver_endpoint, ResolverEndpoint::Company);
        assert_eq!(config.clearbit_company_url, "http://localhost:9000");
        assert_eq!(config.verifier_key, None);
        assert_eq!(config.scraper_cookie.as_deref(), Some("li_at=xyz"));
        assert_eq!(config.scraper_user_agent, None);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_config_file("/definitely/not/here.toml").is_err());
    }

    #[test]
    fn test_load_malformed_toml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[network\nrequest_timeout = ").unwrap();
        assert!(load_config_file(file.path().to_str().unwrap()).is_err());
    }
}
