//! Domain resolution against the Clearbit company APIs.

use super::DomainResolver;
use crate::core::config::{Config, ResolverEndpoint};
use crate::core::error::CollaboratorError;
use crate::core::models::CompanyMatch;
use crate::utils::domain::clean_resolved_domain;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

const LINKEDIN_BASE: &str = "https://www.linkedin.com/";
const TWITTER_BASE: &str = "https://twitter.com/";
const FACEBOOK_BASE: &str = "https://www.facebook.com/";
const LINKEDIN_SEARCH: &str = "https://www.linkedin.com/search/results/all/";

/// Company record shared by the autocomplete and lookup endpoints.
/// Social fields arrive either as plain strings or as `{ "handle": .. }` objects.
#[derive(Debug, Default, Deserialize)]
struct ClearbitCompany {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    linkedin: Option<Value>,
    #[serde(default)]
    twitter: Option<Value>,
    #[serde(default)]
    facebook: Option<Value>,
}

/// Turns a social field into a full URL. Full URLs pass through, bare
/// handles are appended to `base`.
fn social_link(value: Option<&Value>, base: &str) -> Option<String> {
    let handle = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Object(map) => map.get("handle")?.as_str()?.trim().to_string(),
        _ => return None,
    };
    if handle.is_empty() {
        None
    } else if handle.starts_with("http://") || handle.starts_with("https://") {
        Some(handle)
    } else {
        Some(format!("{}{}", base, handle.trim_start_matches('/')))
    }
}

fn linkedin_search_url(name: &str) -> Option<String> {
    Url::parse_with_params(LINKEDIN_SEARCH, &[("keywords", name)])
        .ok()
        .map(String::from)
}

impl ClearbitCompany {
    fn into_match(self, endpoint: ResolverEndpoint) -> Option<CompanyMatch> {
        let domain = self
            .domain
            .as_deref()
            .map(clean_resolved_domain)
            .filter(|d| !d.is_empty())?;

        let mut linkedin = social_link(self.linkedin.as_ref(), LINKEDIN_BASE);
        if linkedin.is_none() && endpoint == ResolverEndpoint::Autocomplete {
            linkedin = self.name.as_deref().and_then(linkedin_search_url);
        }

        Some(CompanyMatch {
            resolved_name: self.name.filter(|n| !n.trim().is_empty()),
            domain,
            logo_url: self.logo.filter(|l| !l.is_empty()),
            linkedin,
            twitter: social_link(self.twitter.as_ref(), TWITTER_BASE),
            facebook: social_link(self.facebook.as_ref(), FACEBOOK_BASE),
        })
    }
}

/// Resolves company names with one of the three Clearbit endpoints.
#[derive(Clone)]
pub struct ClearbitResolver {
    http_client: Client,
    endpoint: ResolverEndpoint,
    autocomplete_url: String,
    company_url: String,
    api_key: Option<String>,
}

impl ClearbitResolver {
    pub fn new(config: &Config, http_client: Client) -> Self {
        Self {
            http_client,
            endpoint: config.resolver_endpoint,
            autocomplete_url: config.clearbit_autocomplete_url.clone(),
            company_url: config.clearbit_company_url.clone(),
            api_key: config.domain_resolver_key.clone(),
        }
    }

    async fn suggest(&self, company_name: &str) -> Result<Option<CompanyMatch>, CollaboratorError> {
        let url = format!("{}/v1/companies/suggest", self.autocomplete_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("query", company_name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollaboratorError::Status(status.as_u16()));
        }
        let suggestions: Vec<ClearbitCompany> = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Decode(e.to_string()))?;

        tracing::debug!(target: "resolution", "'{}': {} suggestions", company_name, suggestions.len());
        Ok(suggestions
            .into_iter()
            .next()
            .and_then(|top| top.into_match(self.endpoint)))
    }

    async fn find(&self, path: &str, company_name: &str) -> Result<Option<CompanyMatch>, CollaboratorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CollaboratorError::MissingKey("domain resolver"))?;

        let url = format!("{}{}", self.company_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(&[("name", company_name)])
            .bearer_auth(api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(CollaboratorError::Status(status.as_u16())),
            _ => {
                let company: ClearbitCompany = response
                    .json()
                    .await
                    .map_err(|e| CollaboratorError::Decode(e.to_string()))?;
                Ok(company.into_match(self.endpoint))
            }
        }
    }
}

#[async_trait]
impl DomainResolver for ClearbitResolver {
    async fn resolve(&self, company_name: &str) -> Result<Option<CompanyMatch>, CollaboratorError> {
        tracing::debug!(target: "resolution", "Resolving '{}' via {} endpoint", company_name, self.endpoint);
        let result = match self.endpoint {
            ResolverEndpoint::Autocomplete => self.suggest(company_name).await,
            ResolverEndpoint::Domain => self.find("/v1/domains/find", company_name).await,
            ResolverEndpoint::Company => self.find("/v2/companies/find", company_name).await,
        };
        if let Ok(Some(ref found)) = result {
            tracing::info!(target: "resolution", "'{}' resolved to {}", company_name, found.domain);
        }
        result
    }
}
