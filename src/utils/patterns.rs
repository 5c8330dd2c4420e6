//! Generates the fixed set of email address candidates for a name and domain.

use crate::core::models::PersonName;

/// One local-part template. The declaration order is the display and
/// priority order of the generated candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmailPattern {
    /// `first@domain`
    First,
    /// `last@domain`
    Last,
    /// `first.last@domain`
    FirstDotLast,
    /// `firstlast@domain`
    FirstLast,
    /// `{initial}last@domain`
    InitialLast,
    /// `last{initial}@domain`
    LastInitial,
}

impl EmailPattern {
    pub const ALL: [EmailPattern; 6] = [
        EmailPattern::First,
        EmailPattern::Last,
        EmailPattern::FirstDotLast,
        EmailPattern::FirstLast,
        EmailPattern::InitialLast,
        EmailPattern::LastInitial,
    ];

    /// Renders this template. Names are lowercased; the domain is used as given.
    /// Empty inputs are not rejected and simply produce degenerate addresses.
    pub fn render(&self, name: &PersonName, domain: &str) -> String {
        let first = name.first.to_lowercase();
        let last = name.last.to_lowercase();
        let initial: String = first.chars().take(1).collect();

        let local_part = match self {
            EmailPattern::First => first,
            EmailPattern::Last => last,
            EmailPattern::FirstDotLast => format!("{}.{}", first, last),
            EmailPattern::FirstLast => format!("{}{}", first, last),
            EmailPattern::InitialLast => format!("{}{}", initial, last),
            EmailPattern::LastInitial => format!("{}{}", last, initial),
        };
        format!("{}@{}", local_part, domain)
    }
}

/// Returns exactly six candidates in [`EmailPattern::ALL`] order.
///
/// Candidates are not deduplicated: an empty first name makes the last two
/// templates both collapse to `last@domain`, and both are kept.
pub fn generate_candidates(first_name: &str, last_name: &str, domain: &str) -> Vec<String> {
    let name = PersonName::new(first_name, last_name);
    let candidates: Vec<String> = EmailPattern::ALL
        .iter()
        .map(|pattern| pattern.render(&name, domain))
        .collect();

    tracing::trace!(
        "Generated candidates for '{} {}' @ '{}': {:?}",
        first_name,
        last_name,
        domain,
        candidates
    );
    candidates
}
