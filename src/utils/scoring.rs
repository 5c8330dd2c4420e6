//! Confidence scoring for company-name matches.
//!
//! The score is the normalized Indel similarity ratio: `2 * LCS / (|a| + |b|)`
//! scaled to 0..=100, where LCS is the longest common subsequence of the two
//! lowercased strings measured in Unicode scalar values. Rounding is
//! half-to-even and done in integer arithmetic, so the exported value is
//! exact and reproducible.

/// Length of the longest common subsequence of `a` and `b`.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // Single rolling row over the shorter string.
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut row = vec![0usize; inner.len() + 1];
    for &oc in outer {
        let mut diag = 0;
        for (j, &ic) in inner.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if oc == ic {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[inner.len()]
}

/// `numerator / denominator` rounded half-to-even.
fn div_round_half_even(numerator: usize, denominator: usize) -> usize {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);
    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Case-insensitive similarity of two names, 0 to 100.
///
/// 100 means identical after lowercasing, 0 means no characters in common.
/// Returns 0 when either side is empty. Symmetric in its arguments.
pub fn score(query: &str, candidate_name: &str) -> u8 {
    let a: Vec<char> = query.to_lowercase().chars().collect();
    let b: Vec<char> = candidate_name.to_lowercase().chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let common = lcs_len(&a, &b);
    let scaled = div_round_half_even(200 * common, a.len() + b.len());
    scaled.min(100) as u8
}

/// Scores against a possibly absent candidate name; absence scores 0.
pub fn score_candidate(query: &str, candidate_name: Option<&str>) -> u8 {
    candidate_name.map_or(0, |name| score(query, name))
}
