//! Company-name cleanup applied before domain lookups.

/// Legal-entity tokens removed from company names, in removal order.
pub const LEGAL_SUFFIXES: [&str; 8] = ["inc", "ltd", "llc", "corp", "co", "pvt", "gmbh", "sas"];

/// Lowercases `raw`, removes every occurrence of each [`LEGAL_SUFFIXES`]
/// token and trims the outer whitespace.
///
/// Tokens are removed as plain substrings, not whole words, so "coinbase"
/// loses its leading "co".
pub fn normalize(raw: &str) -> String {
    let mut name = raw.to_lowercase();
    for token in LEGAL_SUFFIXES {
        name = name.replace(token, "");
    }
    name.trim().to_string()
}
