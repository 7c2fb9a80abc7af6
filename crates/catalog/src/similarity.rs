//! Word-set similarity matching for fuzzy title lookup.
//!
//! Occupation, company, and progression lookups all key on free-form job
//! titles. Jaccard similarity over lowercase word sets tolerates reordered
//! or partially different titles ("Software Engineer" vs "Software
//! Developer") without pulling in a full fuzzy-matching stack.

use std::collections::BTreeSet;

/// Default similarity threshold for fuzzy title matching.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// A candidate title that cleared the similarity threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleMatch {
    /// The matched candidate title, as provided.
    pub title: String,
    /// Jaccard similarity (0.0 - 1.0).
    pub similarity: f64,
}

fn word_set(title: &str) -> BTreeSet<String> {
    title
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}

/// Compute Jaccard similarity between two titles' word sets.
///
/// Returns a value between 0.0 (disjoint) and 1.0 (identical word sets,
/// ignoring case and word order).
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let a_words = word_set(a);
    let b_words = word_set(b);

    let union = a_words.union(&b_words).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a_words.intersection(&b_words).count();
    intersection as f64 / union as f64
}

/// Find candidate titles similar to a query.
///
/// Returns matches sorted by similarity descending, filtered by the given
/// threshold. Ties keep the candidates' original order.
pub fn find_similar<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> Vec<TitleMatch> {
    let mut matches: Vec<TitleMatch> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let similarity = title_similarity(query, candidate);
            if similarity >= threshold {
                Some(TitleMatch {
                    title: candidate.to_string(),
                    similarity,
                })
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matches
}

/// Best-matching candidate title above the threshold, if any.
pub fn best_match<'a>(
    query: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    threshold: f64,
) -> Option<String> {
    find_similar(query, candidates, threshold)
        .into_iter()
        .next()
        .map(|m| m.title)
}
