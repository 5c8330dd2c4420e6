//! Profile page scraping.

mod linkedin;

pub use linkedin::LinkedInScraper;

use crate::core::error::CollaboratorError;
use async_trait::async_trait;

/// Reads the current company name from a public profile page.
#[async_trait]
pub trait ProfileScraper: Send + Sync {
    async fn scrape_company(&self, profile_url: &str) -> Result<Option<String>, CollaboratorError>;
}
