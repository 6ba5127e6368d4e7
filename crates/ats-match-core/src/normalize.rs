//! Keyword identity normalization.
//!
//! Two keywords are the same keyword when their normalized forms are equal.
//! Normalization lowercases, spells out the language suffixes `+` and `#`
//! (`c++` becomes `cpp`, `c#` becomes `csharp`), drops every other character
//! that is neither alphanumeric nor whitespace, trims, and collapses internal
//! whitespace runs to a single space.

/// Shortest normalized form that may be matched against free text.
///
/// A one-character identity is a substring of almost any resume.
pub const MIN_IDENTITY_CHARS: usize = 2;

/// Normalize a keyword for identity comparison.
///
/// ```
/// use ats_match_core::normalize::normalize_keyword;
///
/// assert_eq!(normalize_keyword("  Next.js "), "nextjs");
/// assert_eq!(normalize_keyword("Machine\tLearning"), "machine learning");
/// assert_eq!(normalize_keyword("CI/CD"), "cicd");
/// assert_eq!(normalize_keyword("C++"), "cpp");
/// assert_eq!(normalize_keyword("C#"), "csharp");
/// ```
pub fn normalize_keyword(keyword: &str) -> String {
    let mut stripped = String::with_capacity(keyword.len());
    // `+` and `#` only count as part of a word when they trail one.
    let mut in_word = false;
    for c in keyword.to_lowercase().chars() {
        match c {
            '+' if in_word => stripped.push('p'),
            '#' if in_word => stripped.push_str("sharp"),
            c if c.is_alphanumeric() || c.is_whitespace() => stripped.push(c),
            _ => {}
        }
        in_word = c.is_alphanumeric() || (c == '+' && in_word);
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formatting variations of an already-normalized keyword.
///
/// Returns the space-removed, space-to-dash, dash-to-space and dash-removed
/// forms, in that order, skipping any that equal the input or an earlier
/// variation.
pub fn variations(normalized: &str) -> Vec<String> {
    let candidates = [
        normalized.replace(' ', ""),
        normalized.replace(' ', "-"),
        normalized.replace('-', " "),
        normalized.replace('-', ""),
    ];

    let mut out: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate != normalized && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}
