//! Provides the `ConfigBuilder` for fluent configuration construction.

use super::loading::{apply_file_config, load_config_file};
use super::validation::validate_config;
use super::{Config, ConfigFile, ResolverEndpoint, Result};
use crate::AppError;
use std::path::Path;
use std::time::Duration;

const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["./lead-enrich.toml", "./config.toml"];

/// Builder pattern for creating `Config` instances fluently.
///
/// Settings are layered: defaults, then a TOML file, then the overrides set
/// on the builder. The result is validated before it is returned.
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
    config_file_path: Option<String>,
    skip_default_locations: bool,
    overrides: ConfigFile,
}

impl ConfigBuilder {
    /// Creates a new builder with default configuration values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify an optional configuration file path to load.
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file_path = Some(path.into());
        self
    }

    /// Do not look for `./lead-enrich.toml` or `./config.toml` when no
    /// explicit file was given.
    pub fn skip_default_locations(mut self) -> Self {
        self.skip_default_locations = true;
        self
    }

    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.overrides.network.request_timeout = Some(duration.as_secs());
        self
    }
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.overrides.network.user_agent = Some(value.into());
        self
    }
    pub fn courtesy_delay(mut self, duration: Duration) -> Self {
        self.overrides.network.courtesy_delay_ms = Some(duration.as_millis() as u64);
        self
    }
    pub fn resolver_endpoint(mut self, endpoint: ResolverEndpoint) -> Self {
        self.overrides.resolver.endpoint = Some(endpoint);
        self
    }
    pub fn domain_resolver_key(mut self, key: impl Into<String>) -> Self {
        self.overrides.resolver.api_key = Some(key.into());
        self
    }
    pub fn clearbit_autocomplete_url(mut self, url: impl Into<String>) -> Self {
        self.overrides.resolver.autocomplete_url = Some(url.into());
        self
    }
    pub fn clearbit_company_url(mut self, url: impl Into<String>) -> Self {
        self.overrides.resolver.company_url = Some(url.into());
        self
    }
    pub fn verifier_key(mut self, key: impl Into<String>) -> Self {
        self.overrides.verifier.api_key = Some(key.into());
        self
    }
    pub fn hunter_url(mut self, url: impl Into<String>) -> Self {
        self.overrides.verifier.base_url = Some(url.into());
        self
    }
    pub fn scraper_user_agent(mut self, value: impl Into<String>) -> Self {
        self.overrides.scraper.user_agent = Some(value.into());
        self
    }
    pub fn scraper_cookie(mut self, value: impl Into<String>) -> Self {
        self.overrides.scraper.cookie = Some(value.into());
        self
    }

    /// Builds the final `Config` object, applying defaults, file settings, overrides, and validation.
    pub fn build(mut self) -> Result<Config> {
        let mut loaded_path: Option<String> = None;

        if let Some(ref path) = self.config_file_path {
            match load_config_file(path) {
                Ok(file_config) => {
                    apply_file_config(&mut self.config, &file_config);
                    loaded_path = Some(path.clone());
                    tracing::info!("Loaded base configuration from specified file: {}", path);
                }
                Err(e) => {
                    tracing::error!("Failed to load specified config file '{}': {}", path, e);
                    return Err(AppError::Config(format!(
                        "Failed to load specified configuration file '{}': {}",
                        path, e
                    )));
                }
            }
        } else if !self.skip_default_locations {
            tracing::debug!("No config file specified, checking default locations.");
            for path_str in DEFAULT_CONFIG_LOCATIONS {
                if !Path::new(path_str).exists() {
                    continue;
                }
                match load_config_file(path_str) {
                    Ok(file_config) => {
                        apply_file_config(&mut self.config, &file_config);
                        loaded_path = Some(path_str.to_string());
                        tracing::info!(
                            "Loaded base configuration from default location: {}",
                            path_str
                        );
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load or parse default config '{}': {}",
                            path_str,
                            e
                        );
                    }
                }
            }
            if loaded_path.is_none() {
                tracing::debug!("No configuration file found. Using default values and overrides.");
            }
        }

        apply_file_config(&mut self.config, &self.overrides);
        self.config.loaded_config_path = loaded_path;
        validate_config(&mut self.config)?;

        tracing::debug!("Final configuration built successfully.");
        Ok(self.config)
    }
}
