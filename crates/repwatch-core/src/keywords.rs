//! Keyword normalization shared by every entry point that accepts keywords.

use std::collections::HashSet;

/// Trims each keyword, drops empties, and removes case-insensitive
/// duplicates. The first spelling of a duplicate wins and input order is
/// preserved.
#[must_use]
pub fn normalize_keywords<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    raw.into_iter()
        .filter_map(|k| {
            let trimmed = k.as_ref().trim();
            if trimmed.is_empty() {
                return None;
            }
            seen.insert(trimmed.to_lowercase())
                .then(|| trimmed.to_string())
        })
        .collect()
}

/// Splits a comma-separated keyword list and normalizes it.
#[must_use]
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    normalize_keywords(raw.split(','))
}
