//! Email verification: the collaborator trait and its Hunter-backed implementation.

mod hunter;

pub use hunter::HunterVerifier;

use crate::core::error::CollaboratorError;
use crate::core::models::VerificationStatus;
use async_trait::async_trait;

/// Checks the deliverability of a single candidate address.
#[async_trait]
pub trait EmailVerifier: Send + Sync {
    async fn verify(&self, email: &str) -> Result<VerificationStatus, CollaboratorError>;
}
