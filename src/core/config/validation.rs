//! Contains validation logic for the final Config struct.

use super::{Config, Result};
use crate::core::error::AppError;
use std::time::Duration;
use url::Url;

const MAX_COURTESY_DELAY: Duration = Duration::from_secs(10);

fn validate_base_url(label: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", label, value, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "{} must use http or https: {}",
            label, value
        )));
    }
    Ok(())
}

/// Validates the configuration settings after loading and potential overrides.
/// Mutates the config to clamp values where that is the sensible fix.
/// Internal helper for the builder's `build` method.
pub(crate) fn validate_config(config: &mut Config) -> Result<()> {
    if config.request_timeout.is_zero() {
        return Err(AppError::Config(
            "Request timeout must be at least one second.".to_string(),
        ));
    }
    if config.courtesy_delay > MAX_COURTESY_DELAY {
        tracing::warn!(
            "Courtesy delay ({:?}) exceeds {:?}. Clamping.",
            config.courtesy_delay,
            MAX_COURTESY_DELAY
        );
        config.courtesy_delay = MAX_COURTESY_DELAY;
    }
    if config.user_agent.trim().is_empty() {
        return Err(AppError::Config("User agent cannot be empty.".to_string()));
    }

    validate_base_url("Clearbit autocomplete URL", &config.clearbit_autocomplete_url)?;
    validate_base_url("Clearbit company URL", &config.clearbit_company_url)?;
    validate_base_url("Hunter URL", &config.hunter_url)?;

    if config.resolver_endpoint.requires_key() && config.domain_resolver_key.is_none() {
        tracing::warn!(
            "Resolver endpoint '{}' needs a domain resolver API key; every lookup will miss.",
            config.resolver_endpoint
        );
    }
    if config.verifier_key.is_none() {
        tracing::debug!("No verifier API key configured; candidates will be reported as invalid.");
    }
    Ok(())
}
