//! Fuzzy matching for "did you mean" suggestions.
//!
//! Scores are the Dice coefficient over character bigrams, ignoring
//! whitespace: identical strings score 1 and strings shorter than two
//! characters score 0 against anything else.

use std::collections::{BTreeSet, HashMap};

/// Candidates must score strictly above this to be suggested.
pub const SUGGESTION_THRESHOLD: f64 = 0.4;

/// Similarity of two strings in `[0, 1]`.
pub fn similarity(first: &str, second: &str) -> f64 {
    let first: Vec<char> = first.chars().filter(|c| !c.is_whitespace()).collect();
    let second: Vec<char> = second.chars().filter(|c| !c.is_whitespace()).collect();

    if first == second {
        return 1.0;
    }
    if first.len() < 2 || second.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in first.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_default() += 1;
    }

    let mut shared = 0usize;
    for pair in second.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / (first.len() + second.len() - 2) as f64
}

/// Candidates scoring above [`SUGGESTION_THRESHOLD`], best match first.
///
/// Duplicates are dropped; ties keep alphabetical order.
pub fn rank<'a>(keyword: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = candidates.into_iter().collect();
    let mut scored: Vec<(f64, &str)> = unique
        .into_iter()
        .map(|candidate| (similarity(keyword, candidate), candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, c)| c.to_string()).collect()
}
