//! Runtime configuration: defaults, the TOML file layout and the builder that
//! merges them with explicit overrides.

mod builder;
mod loading;
mod validation;

pub use builder::ConfigBuilder;

pub(crate) use crate::core::error::Result;

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_CLEARBIT_AUTOCOMPLETE_URL: &str = "https://autocomplete.clearbit.com";
pub const DEFAULT_CLEARBIT_COMPANY_URL: &str = "https://company.clearbit.com";
pub const DEFAULT_HUNTER_URL: &str = "https://api.hunter.io";

/// Which Clearbit lookup the domain resolver calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverEndpoint {
    /// Keyless company-name suggestions, including logo and social links.
    #[default]
    Autocomplete,
    /// Keyed name-to-domain lookup.
    Domain,
    /// Keyed full company record lookup.
    Company,
}

impl ResolverEndpoint {
    pub fn requires_key(&self) -> bool {
        !matches!(self, Self::Autocomplete)
    }
}

impl fmt::Display for ResolverEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Autocomplete => write!(f, "autocomplete"),
            Self::Domain => write!(f, "domain"),
            Self::Company => write!(f, "company"),
        }
    }
}

/// Effective configuration used by the enricher and its collaborators.
#[derive(Clone)]
pub struct Config {
    pub request_timeout: Duration,
    pub user_agent: String,
    /// Pause after each lookup in bulk domain conversion.
    pub courtesy_delay: Duration,

    pub resolver_endpoint: ResolverEndpoint,
    pub domain_resolver_key: Option<String>,
    pub clearbit_autocomplete_url: String,
    pub clearbit_company_url: String,

    pub verifier_key: Option<String>,
    pub hunter_url: String,

    pub scraper_user_agent: Option<String>,
    pub scraper_cookie: Option<String>,

    pub loaded_config_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            courtesy_delay: Duration::from_millis(300),
            resolver_endpoint: ResolverEndpoint::default(),
            domain_resolver_key: None,
            clearbit_autocomplete_url: DEFAULT_CLEARBIT_AUTOCOMPLETE_URL.to_string(),
            clearbit_company_url: DEFAULT_CLEARBIT_COMPANY_URL.to_string(),
            verifier_key: None,
            hunter_url: DEFAULT_HUNTER_URL.to_string(),
            scraper_user_agent: None,
            scraper_cookie: None,
            loaded_config_path: None,
        }
    }
}

fn redact(secret: &Option<String>) -> &'static str {
    if secret.is_some() {
        "<redacted>"
    } else {
        "<unset>"
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .field("courtesy_delay", &self.courtesy_delay)
            .field("resolver_endpoint", &self.resolver_endpoint)
            .field("domain_resolver_key", &redact(&self.domain_resolver_key))
            .field("clearbit_autocomplete_url", &self.clearbit_autocomplete_url)
            .field("clearbit_company_url", &self.clearbit_company_url)
            .field("verifier_key", &redact(&self.verifier_key))
            .field("hunter_url", &self.hunter_url)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_cookie", &redact(&self.scraper_cookie))
            .field("loaded_config_path", &self.loaded_config_path)
            .finish()
    }
}

/// On-disk layout of a TOML configuration file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub network: NetworkSection,
    pub resolver: ResolverSection,
    pub verifier: VerifierSection,
    pub scraper: ScraperSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    pub request_timeout: Option<u64>,
    pub user_agent: Option<String>,
    pub courtesy_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResolverSection {
    pub api_key: Option<String>,
    pub endpoint: Option<ResolverEndpoint>,
    pub autocomplete_url: Option<String>,
    pub company_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifierSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScraperSection {
    pub user_agent: Option<String>,
    pub cookie: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config {
            domain_resolver_key: Some("sk_live_resolver".to_string()),
            verifier_key: Some("hunter-secret".to_string()),
            scraper_cookie: Some("li_at=abc".to_string()),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk_live_resolver"));
        assert!(!rendered.contains("hunter-secret"));
        assert!(!rendered.contains("li_at=abc"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_resolver_endpoint_key_requirement() {
        assert!(!ResolverEndpoint::Autocomplete.requires_key());
        assert!(ResolverEndpoint::Domain.requires_key());
        assert!(ResolverEndpoint::Company.requires_key());
    }
}
