//! Company-name to domain resolution.

mod clearbit;

pub use clearbit::ClearbitResolver;

use crate::core::error::CollaboratorError;
use crate::core::models::CompanyMatch;
use async_trait::async_trait;

/// Maps a company name to at most one matching company record.
#[async_trait]
pub trait DomainResolver: Send + Sync {
    /// `Ok(None)` means the lookup succeeded but found nothing.
    async fn resolve(&self, company_name: &str) -> Result<Option<CompanyMatch>, CollaboratorError>;
}
