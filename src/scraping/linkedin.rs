//! Fetches a LinkedIn profile page and reads the company headline.

use super::ProfileScraper;
use crate::core::config::Config;
use crate::core::error::CollaboratorError;
use crate::utils::domain::normalize_url;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};

const COMPANY_SELECTOR: &str = "span.text-body-medium";

/// Text of the first element matching [`COMPANY_SELECTOR`], trimmed.
fn company_from_html(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(COMPANY_SELECTOR).ok()?;
    let text = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Scrapes profile pages with the user's own browser headers, since the
/// profile content is only served to signed-in sessions.
#[derive(Clone)]
pub struct LinkedInScraper {
    http_client: Client,
    headers: HeaderMap,
}

impl LinkedInScraper {
    pub fn new(config: &Config, http_client: Client) -> Self {
        let mut headers = HeaderMap::new();
        if let Some(ref ua) = config.scraper_user_agent {
            match HeaderValue::from_str(ua) {
                Ok(value) => {
                    headers.insert(USER_AGENT, value);
                }
                Err(e) => tracing::warn!("Ignoring invalid scraper User-Agent header: {}", e),
            }
        }
        if let Some(ref cookie) = config.scraper_cookie {
            match HeaderValue::from_str(cookie) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(COOKIE, value);
                }
                Err(e) => tracing::warn!("Ignoring invalid scraper Cookie header: {}", e),
            }
        }
        Self {
            http_client,
            headers,
        }
    }
}

#[async_trait]
impl ProfileScraper for LinkedInScraper {
    async fn scrape_company(&self, profile_url: &str) -> Result<Option<String>, CollaboratorError> {
        let url = normalize_url(profile_url)
            .map_err(|_| CollaboratorError::InvalidUrl(profile_url.to_string()))?;

        tracing::debug!(target: "scraping", "Fetching profile page {}", url);
        let response = self
            .http_client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(target: "scraping", "Profile page {} returned {}", profile_url, status);
            return Err(CollaboratorError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let company = company_from_html(&body);
        match company {
            Some(ref name) => tracing::info!(target: "scraping", "{} works at '{}'", profile_url, name),
            None => tracing::info!(target: "scraping", "No company headline on {}", profile_url),
        }
        Ok(company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_from_html() {
        let html = r#"<html><body>
            <h1>John Doe</h1>
            <span class="text-body-medium break-words"> Acme Corp </span>
            <span class="text-body-medium">Ignored</span>
        </body></html>"#;
        assert_eq!(company_from_html(html).as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_company_missing_or_blank() {
        assert_eq!(company_from_html("<html><body><p>nothing</p></body></html>"), None);
        assert_eq!(
            company_from_html(r#"<span class="text-body-medium">   </span>"#),
            None
        );
    }
}
