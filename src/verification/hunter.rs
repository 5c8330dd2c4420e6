//! Email verification through the Hunter email-verifier API.

use super::EmailVerifier;
use crate::core::config::Config;
use crate::core::error::CollaboratorError;
use crate::core::models::VerificationStatus;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VerifierResponse {
    #[serde(default)]
    data: Option<VerifierData>,
}

#[derive(Debug, Deserialize)]
struct VerifierData {
    #[serde(default)]
    status: Option<String>,
}

/// Calls `GET {base}/v2/email-verifier?email=..&api_key=..`.
#[derive(Clone)]
pub struct HunterVerifier {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HunterVerifier {
    pub fn new(config: &Config, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: config.hunter_url.clone(),
            api_key: config.verifier_key.clone(),
        }
    }
}

#[async_trait]
impl EmailVerifier for HunterVerifier {
    async fn verify(&self, email: &str) -> Result<VerificationStatus, CollaboratorError> {
        let task_label = format!("[Hunter Verify: {}]", email);
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CollaboratorError::MissingKey("email verifier"))?;

        let url = format!("{}/v2/email-verifier", self.base_url);
        tracing::debug!(target: "verification_api", "{} Sending request", task_label);

        let response = self
            .http_client
            .get(&url)
            .query(&[("email", email), ("api_key", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(target: "verification_api", "{} Received status: {}", task_label, status);
            return Err(CollaboratorError::Status(status.as_u16()));
        }

        let body: VerifierResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Decode(e.to_string()))?;

        // A success response without a status is reported the same way as a failure.
        let verdict = body
            .data
            .and_then(|d| d.status)
            .map(|s| VerificationStatus::from_api(&s))
            .unwrap_or(VerificationStatus::Invalid);

        tracing::info!(target: "verification_api", "{} Status: {}", task_label, verdict);
        Ok(verdict)
    }
}
