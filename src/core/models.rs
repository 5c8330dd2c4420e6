//! Data structures shared by the enrichment flows: names, resolver records,
//! verification statuses and the input/output rows of each flow.

use crate::utils::table::TableRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal written to the `Domain` column when resolution misses.
pub const NOT_FOUND: &str = "Not Found";

/// A person's name as given on an input row or extracted from a profile URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// True when both name parts are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.first.is_empty() && !self.last.is_empty()
    }
}

/// Raw record returned by a [`crate::DomainResolver`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyMatch {
    pub resolved_name: Option<String>,
    pub domain: String,
    pub logo_url: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

/// A resolved company together with how closely its name matches the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCandidate {
    pub resolved_name: Option<String>,
    pub domain: String,
    /// Similarity between the cleaned query and `resolved_name`, 0 to 100.
    pub confidence: u8,
    pub logo_url: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
}

impl DomainCandidate {
    /// Builds a candidate from a resolver record, scoring `query` against the
    /// resolved name. A record without a name scores 0.
    pub fn from_match(query: &str, record: CompanyMatch) -> Self {
        let confidence =
            crate::utils::scoring::score_candidate(query, record.resolved_name.as_deref());
        Self {
            resolved_name: record.resolved_name,
            domain: record.domain,
            confidence,
            logo_url: record.logo_url,
            linkedin: record.linkedin,
            twitter: record.twitter,
            facebook: record.facebook,
        }
    }

    /// Resolved name, or `raw_company` when the resolver reported none.
    pub fn display_name<'a>(&'a self, raw_company: &'a str) -> &'a str {
        self.resolved_name.as_deref().unwrap_or(raw_company)
    }
}

/// Deliverability status reported by an [`crate::EmailVerifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Valid,
    Invalid,
    AcceptAll,
    Webmail,
    Disposable,
    Unknown,
}

impl VerificationStatus {
    /// Maps a verifier status string onto the enum. Unrecognised values are
    /// treated as `Unknown`.
    pub fn from_api(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "valid" => Self::Valid,
            "invalid" => Self::Invalid,
            "accept_all" => Self::AcceptAll,
            "webmail" => Self::Webmail,
            "disposable" => Self::Disposable,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::AcceptAll => "accept_all",
            Self::Webmail => "webmail",
            Self::Disposable => "disposable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CSV Enrichment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentInput {
    #[serde(rename = "Company", default)]
    pub company: String,
    #[serde(rename = "First Name", default)]
    pub first_name: String,
    #[serde(rename = "Last Name", default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRow {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Guessed Email")]
    pub guessed_email: String,
    /// Empty when no email could be guessed.
    #[serde(rename = "Validation Status")]
    pub validation_status: Option<VerificationStatus>,
}

impl TableRow for EnrichmentRow {
    const HEADERS: &'static [&'static str] =
        &["Company", "Domain", "Guessed Email", "Validation Status"];
}

// ---------------------------------------------------------------------------
// Domain Converter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInput {
    #[serde(rename = "Company", default)]
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRow {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Confidence %")]
    pub confidence: u8,
    #[serde(rename = "LinkedIn")]
    pub linkedin: String,
    #[serde(rename = "Twitter")]
    pub twitter: String,
    #[serde(rename = "Facebook")]
    pub facebook: String,
}

impl TableRow for DomainRow {
    const HEADERS: &'static [&'static str] = &[
        "Company",
        "Domain",
        "Confidence %",
        "LinkedIn",
        "Twitter",
        "Facebook",
    ];
}

impl DomainRow {
    /// Row emitted for a bulk query the resolver could not match.
    pub fn not_found(raw_company: &str) -> Self {
        Self {
            company: raw_company.to_string(),
            domain: NOT_FOUND.to_string(),
            confidence: 0,
            linkedin: String::new(),
            twitter: String::new(),
            facebook: String::new(),
        }
    }

    /// Row for a resolved query. `raw_company` fills the `Company` column
    /// when the resolver returned no name.
    pub fn from_candidate(candidate: &DomainCandidate, raw_company: &str) -> Self {
        Self {
            company: candidate.display_name(raw_company).to_string(),
            domain: candidate.domain.clone(),
            confidence: candidate.confidence,
            linkedin: candidate.linkedin.clone().unwrap_or_default(),
            twitter: candidate.twitter.clone().unwrap_or_default(),
            facebook: candidate.facebook.clone().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Email Pattern Guesser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternInput {
    #[serde(rename = "Domain", default)]
    pub domain: String,
    #[serde(rename = "First Name", default)]
    pub first_name: String,
    #[serde(rename = "Last Name", default)]
    pub last_name: String,
}

impl PatternInput {
    pub fn is_complete(&self) -> bool {
        !self.domain.is_empty() && !self.first_name.is_empty() && !self.last_name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRow {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "Guessed Email")]
    pub guessed_email: String,
}

impl TableRow for PatternRow {
    const HEADERS: &'static [&'static str] =
        &["Domain", "First Name", "Last Name", "Guessed Email"];
}

// ---------------------------------------------------------------------------
// LinkedIn Guesser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(rename = "LinkedIn URL", default)]
    pub linkedin_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    #[serde(rename = "LinkedIn URL")]
    pub linkedin_url: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Validation")]
    pub validation: VerificationStatus,
}

impl TableRow for ProfileRow {
    const HEADERS: &'static [&'static str] = &["LinkedIn URL", "Email", "Validation"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_status_from_api() {
        assert_eq!(VerificationStatus::from_api("valid"), VerificationStatus::Valid);
        assert_eq!(VerificationStatus::from_api("INVALID"), VerificationStatus::Invalid);
        assert_eq!(
            VerificationStatus::from_api("accept_all"),
            VerificationStatus::AcceptAll
        );
        assert_eq!(VerificationStatus::from_api("risky"), VerificationStatus::Unknown);
        assert_eq!(VerificationStatus::from_api(""), VerificationStatus::Unknown);
    }

    #[test]
    fn test_domain_candidate_from_match_scores_name() {
        let record = CompanyMatch {
            resolved_name: Some("Acme".to_string()),
            domain: "acme.com".to_string(),
            ..Default::default()
        };
        let candidate = DomainCandidate::from_match("acme", record);
        assert_eq!(candidate.confidence, 100);
        assert_eq!(candidate.resolved_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_domain_candidate_without_name_scores_zero() {
        let record = CompanyMatch {
            resolved_name: None,
            domain: "acme.com".to_string(),
            ..Default::default()
        };
        let candidate = DomainCandidate::from_match("acme", record);
        assert_eq!(candidate.confidence, 0);
        assert_eq!(candidate.resolved_name, None);
        assert_eq!(candidate.display_name("Acme Inc"), "Acme Inc");

        let row = DomainRow::from_candidate(&candidate, "Acme Inc");
        assert_eq!(row.company, "Acme Inc");
        assert_eq!(row.domain, "acme.com");
    }

    #[test]
    fn test_domain_row_not_found_sentinels() {
        let row = DomainRow::not_found("Globex Corp");
        assert_eq!(row.company, "Globex Corp");
        assert_eq!(row.domain, NOT_FOUND);
        assert_eq!(row.confidence, 0);
        assert!(row.linkedin.is_empty() && row.twitter.is_empty() && row.facebook.is_empty());
    }
}
