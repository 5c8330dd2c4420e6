//! # Lead Enrich Core Library
//!
//! Turns company names and contact details into resolved domains and guessed,
//! verified email addresses. Four flows are exposed, each usable for a single
//! item or a whole table:
//!
//! - CSV enrichment: company + name → domain, `first.last@domain`, status.
//! - Domain conversion: company name → domain with a confidence score.
//! - Pattern guessing: domain + name → six candidate addresses.
//! - Profile guessing: LinkedIn profile URL → six verified candidates.
//!
//! The `lead-enrich` command-line tool is a thin adapter over this crate.

mod core;
mod resolution;
mod scraping;
mod utils;
mod verification;

pub use crate::core::config::{Config, ConfigBuilder, ConfigFile, ResolverEndpoint};
pub use crate::core::enricher::{LeadEnricher, ProfileGuess};
pub use crate::core::error::{AppError, CollaboratorError, Result};
pub use crate::core::models::{
    CompanyMatch, DomainCandidate, DomainInput, DomainRow, EnrichmentInput, EnrichmentRow,
    PatternInput, PatternRow, PersonName, ProfileInput, ProfileRow, VerificationStatus, NOT_FOUND,
};
pub use crate::resolution::{ClearbitResolver, DomainResolver};
pub use crate::scraping::{LinkedInScraper, ProfileScraper};
pub use crate::utils::company::{normalize, LEGAL_SUFFIXES};
pub use crate::utils::patterns::{generate_candidates, EmailPattern};
pub use crate::utils::profile::extract_name;
pub use crate::utils::scoring::{score, score_candidate};
pub use crate::utils::table::{
    read_rows, read_rows_from_path, write_rows, TableFormat, TableRow,
};
pub use crate::verification::{EmailVerifier, HunterVerifier};

/// Builds the HTTP client and the Clearbit, Hunter and LinkedIn collaborators.
pub fn initialize_enricher(config: &Config) -> Result<LeadEnricher> {
    LeadEnricher::new(config)
}

/// Runs CSV enrichment over every row, in order. Exactly one output row is
/// produced per input row. `on_progress` receives the number of rows done.
pub async fn enrich_contacts<F>(
    enricher: &LeadEnricher,
    rows: &[EnrichmentInput],
    mut on_progress: F,
) -> Vec<EnrichmentRow>
where
    F: FnMut(usize),
{
    let mut results = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        results.push(enricher.enrich_row(row).await);
        on_progress(index + 1);
    }
    results
}

/// Converts a single company name, failing with `NotFound` on a miss.
pub async fn convert_single(enricher: &LeadEnricher, company: &str) -> Result<DomainCandidate> {
    if company.trim().is_empty() {
        return Err(AppError::MalformedInput(
            "Please enter a company name.".to_string(),
        ));
    }
    enricher
        .convert_company(company)
        .await
        .ok_or_else(|| AppError::NotFound("Domain not found.".to_string()))
}

/// Converts every row, pausing for the configured courtesy delay between
/// lookups. Misses still produce a row.
pub async fn convert_companies<F>(
    enricher: &LeadEnricher,
    rows: &[DomainInput],
    mut on_progress: F,
) -> Vec<DomainRow>
where
    F: FnMut(usize),
{
    let mut results = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            enricher.pause().await;
        }
        results.push(enricher.convert_row(row).await);
        on_progress(index + 1);
    }
    results
}

/// Pattern guessing for one contact. All three fields are required.
pub fn guess_single(domain: &str, first_name: &str, last_name: &str) -> Result<Vec<String>> {
    let input = PatternInput {
        domain: domain.trim().to_string(),
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
    };
    if !input.is_complete() {
        return Err(AppError::MalformedInput(
            "Please fill in all fields (Domain, First Name, Last Name).".to_string(),
        ));
    }
    Ok(generate_candidates(
        &input.first_name,
        &input.last_name,
        &input.domain,
    ))
}

/// Pattern guessing over a table. Incomplete rows are skipped without error;
/// every complete row contributes six output rows.
pub fn guess_bulk(rows: &[PatternInput]) -> Vec<PatternRow> {
    let mut results = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        if !row.is_complete() {
            skipped += 1;
            continue;
        }
        for email in generate_candidates(&row.first_name, &row.last_name, &row.domain) {
            results.push(PatternRow {
                domain: row.domain.clone(),
                first_name: row.first_name.clone(),
                last_name: row.last_name.clone(),
                guessed_email: email,
            });
        }
    }
    if skipped > 0 {
        tracing::info!("Skipped {} incomplete rows.", skipped);
    }
    results
}

/// Profile guessing for a single URL, failing with `NotFound` when the name
/// or domain could not be determined.
pub async fn guess_single_profile(enricher: &LeadEnricher, profile_url: &str) -> Result<ProfileGuess> {
    enricher
        .guess_from_profile(profile_url)
        .await
        .ok_or_else(|| {
            AppError::NotFound(
                "Failed to scrape LinkedIn or fetch domain. Check your inputs or API keys."
                    .to_string(),
            )
        })
}

/// Profile guessing over a table: up to six rows per profile, none when
/// resolution fails.
pub async fn guess_from_profiles<F>(
    enricher: &LeadEnricher,
    rows: &[ProfileInput],
    mut on_progress: F,
) -> Vec<ProfileRow>
where
    F: FnMut(usize),
{
    let mut results = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        results.extend(enricher.profile_rows(&row.linkedin_url).await);
        on_progress(index + 1);
    }
    results
}
