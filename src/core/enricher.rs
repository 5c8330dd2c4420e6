use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{
    DomainCandidate, DomainInput, DomainRow, EnrichmentInput, EnrichmentRow, PersonName,
    ProfileRow, VerificationStatus, NOT_FOUND,
};
use crate::resolution::{ClearbitResolver, DomainResolver};
use crate::scraping::{LinkedInScraper, ProfileScraper};
use crate::utils::company::normalize;
use crate::utils::patterns::{generate_candidates, EmailPattern};
use crate::utils::profile::extract_name;
use crate::verification::{EmailVerifier, HunterVerifier};

use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Candidates generated for one profile, each with its verification status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileGuess {
    pub name: PersonName,
    pub company: String,
    pub domain: String,
    pub emails: Vec<(String, VerificationStatus)>,
}

impl ProfileGuess {
    pub fn into_rows(self, linkedin_url: &str) -> Vec<ProfileRow> {
        self.emails
            .into_iter()
            .map(|(email, validation)| ProfileRow {
                linkedin_url: linkedin_url.to_string(),
                email,
                validation,
            })
            .collect()
    }
}

/// Wires the candidate generator and scorer to the external collaborators
/// and turns input rows into output rows, one row at a time.
///
/// Collaborator failures never escape a row: they are logged and replaced
/// by the same sentinel a genuine miss produces.
#[derive(Clone)]
pub struct LeadEnricher {
    resolver: Arc<dyn DomainResolver>,
    verifier: Arc<dyn EmailVerifier>,
    scraper: Arc<dyn ProfileScraper>,
    courtesy_delay: Duration,
}

impl LeadEnricher {
    /// Creates an enricher backed by the HTTP collaborators.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        tracing::debug!("Initializing LeadEnricher components...");
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Initialization(format!("Failed to build HTTP client: {}", e)))?;

        let resolver = ClearbitResolver::new(config, http_client.clone());
        let verifier = HunterVerifier::new(config, http_client.clone());
        let scraper = LinkedInScraper::new(config, http_client);

        tracing::debug!(
            "LeadEnricher initialized (resolver endpoint: {}).",
            config.resolver_endpoint
        );
        Ok(Self::with_collaborators(
            config,
            Arc::new(resolver),
            Arc::new(verifier),
            Arc::new(scraper),
        ))
    }

    /// Creates an enricher over caller-supplied collaborators.
    pub fn with_collaborators(
        config: &Config,
        resolver: Arc<dyn DomainResolver>,
        verifier: Arc<dyn EmailVerifier>,
        scraper: Arc<dyn ProfileScraper>,
    ) -> Self {
        Self {
            resolver,
            verifier,
            scraper,
            courtesy_delay: config.courtesy_delay,
        }
    }

    pub fn courtesy_delay(&self) -> Duration {
        self.courtesy_delay
    }

    /// Resolves `query` and scores the match. Misses and failures both yield `None`.
    async fn lookup(&self, query: &str) -> Option<DomainCandidate> {
        if query.trim().is_empty() {
            tracing::debug!(target: "lookup", "Empty company name; skipping resolution.");
            return None;
        }
        match self.resolver.resolve(query).await {
            Ok(Some(record)) => Some(DomainCandidate::from_match(query, record)),
            Ok(None) => {
                tracing::info!(target: "lookup", "No domain found for '{}'", query);
                None
            }
            Err(e) => {
                tracing::warn!(target: "lookup", "Domain resolution failed for '{}': {}", query, e);
                None
            }
        }
    }

    /// Verifies one address; any failure is reported as `Invalid`.
    async fn verify(&self, email: &str) -> VerificationStatus {
        match self.verifier.verify(email).await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(target: "verify", "Verification failed for '{}': {}", email, e);
                VerificationStatus::Invalid
            }
        }
    }

    /// CSV enrichment of one row: resolve the company as given, guess
    /// `first.last@domain` and verify it. Always returns exactly one row.
    pub async fn enrich_row(&self, input: &EnrichmentInput) -> EnrichmentRow {
        let Some(candidate) = self.lookup(&input.company).await else {
            return EnrichmentRow {
                company: input.company.clone(),
                domain: NOT_FOUND.to_string(),
                guessed_email: String::new(),
                validation_status: None,
            };
        };

        let name = PersonName::new(input.first_name.as_str(), input.last_name.as_str());
        let email = EmailPattern::FirstDotLast.render(&name, &candidate.domain);
        let status = self.verify(&email).await;
        tracing::debug!(target: "enrich", "[{}] {} -> {}", input.company, email, status);

        EnrichmentRow {
            company: input.company.clone(),
            domain: candidate.domain,
            guessed_email: email,
            validation_status: Some(status),
        }
    }

    /// Domain conversion of a single company name.
    pub async fn convert_company(&self, raw_company: &str) -> Option<DomainCandidate> {
        let cleaned = normalize(raw_company);
        tracing::debug!(target: "convert", "Normalized '{}' to '{}'", raw_company, cleaned);
        self.lookup(&cleaned).await
    }

    /// Domain conversion of one bulk row, with sentinels on a miss.
    pub async fn convert_row(&self, input: &DomainInput) -> DomainRow {
        match self.convert_company(&input.company).await {
            Some(candidate) => DomainRow::from_candidate(&candidate, &input.company),
            None => DomainRow::not_found(&input.company),
        }
    }

    /// LinkedIn flow for one profile URL. Returns `None` unless a first name,
    /// last name and domain were all found.
    pub async fn guess_from_profile(&self, profile_url: &str) -> Option<ProfileGuess> {
        let name = extract_name(profile_url);
        if !name.is_complete() {
            tracing::info!(target: "profile", "Could not derive a full name from '{}'", profile_url);
            return None;
        }

        let company = match self.scraper.scrape_company(profile_url).await {
            Ok(Some(company)) => company,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(target: "profile", "Scraping '{}' failed: {}", profile_url, e);
                return None;
            }
        };

        let candidate = self.lookup(&company).await?;
        let mut emails = Vec::with_capacity(EmailPattern::ALL.len());
        for email in generate_candidates(&name.first, &name.last, &candidate.domain) {
            let status = self.verify(&email).await;
            emails.push((email, status));
        }

        Some(ProfileGuess {
            name,
            company,
            domain: candidate.domain,
            emails,
        })
    }

    /// LinkedIn flow for one bulk row: six rows on success, none otherwise.
    pub async fn profile_rows(&self, profile_url: &str) -> Vec<ProfileRow> {
        let started = Instant::now();
        let rows = self
            .guess_from_profile(profile_url)
            .await
            .map(|guess| guess.into_rows(profile_url))
            .unwrap_or_default();
        tracing::debug!(target: "profile", "[{}] {} rows in {:.2?}", profile_url, rows.len(), started.elapsed());
        rows
    }

    /// Sleeps for the courtesy delay, if one is configured.
    pub(crate) async fn pause(&self) {
        if !self.courtesy_delay.is_zero() {
            sleep(self.courtesy_delay).await;
        }
    }
}
