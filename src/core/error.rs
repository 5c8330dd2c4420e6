//! Error types for the library and its external collaborators.

use thiserror::Error;

/// Library-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Domain extraction failed: {0}")]
    DomainExtraction(String),

    #[error("{0}")]
    MalformedInput(String),

    #[error("{0}")]
    NotFound(String),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure reported by a domain resolver, email verifier or profile scraper.
///
/// The row orchestration layer never propagates these; it logs them and
/// falls back to the same sentinel a genuine miss produces.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("no API key configured for {0}")]
    MissingKey(&'static str),

    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
}
