//! Shared term-frequency text scoring.
//!
//! Both matchers reduce free text to sparse tf-idf vectors and compare with
//! cosine similarity: occupations against a profile's skill text, courses
//! against a missing skill. Vocabulary and document frequencies come from
//! the corpus handed to [`TfIdfSpace::build`]; queries are embedded into the
//! same space, so unseen query terms simply contribute nothing.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Common English words excluded from vectorization.
const STOP_WORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "how",
    "in", "into", "is", "it", "its", "of", "on", "or", "such", "that", "the", "their", "then",
    "there", "these", "they", "this", "to", "was", "were", "will", "with", "you", "your",
];

/// Split text into lowercase skill tokens.
///
/// Splits on anything that is not alphanumeric, `+`, or `#`, so "c++",
/// "c#", and single-letter languages like "r" survive as tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|token| !token.is_empty() && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Sparse term index -> weight vector, l2-normalized.
///
/// Ordered by term index so dot products accumulate in one fixed order
/// and repeat runs produce bit-identical scores.
pub type SparseVector = BTreeMap<usize, f64>;

/// A tf-idf vector space fit over a document corpus.
#[derive(Debug, Clone)]
pub struct TfIdfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl TfIdfSpace {
    /// Fit vocabulary and inverse document frequencies over a corpus and
    /// embed every document.
    ///
    /// Uses smoothed idf, `ln((1 + n) / (1 + df)) + 1`, so corpus-wide
    /// terms keep a positive weight. An empty corpus yields an empty space
    /// where every similarity is zero.
    pub fn build<S: AsRef<str>>(corpus: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = corpus
            .iter()
            .map(|document| tokenize(document.as_ref()))
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen = HashSet::new();
            for token in tokens {
                if seen.insert(token.as_str()) {
                    let next_index = vocabulary.len();
                    let index = *vocabulary.entry(token.clone()).or_insert(next_index);
                    if index == document_frequency.len() {
                        document_frequency.push(0);
                    }
                    document_frequency[index] += 1;
                }
            }
        }

        let total = corpus.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + total) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let base = Self {
            vocabulary,
            idf,
            documents: Vec::new(),
        };
        let documents = tokenized
            .iter()
            .map(|tokens| base.vector_of(tokens))
            .collect();
        Self { documents, ..base }
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus was empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embed arbitrary text into this space.
    ///
    /// Terms outside the fitted vocabulary are dropped; fully out-of-
    /// vocabulary text embeds to the zero vector.
    pub fn embed(&self, text: &str) -> SparseVector {
        self.vector_of(&tokenize(text))
    }

    /// Cosine similarity of `text` against every corpus document, in
    /// corpus order.
    pub fn similarities(&self, text: &str) -> Vec<f64> {
        let query = self.embed(text);
        self.documents
            .iter()
            .map(|document| cosine(&query, document))
            .collect()
    }

    fn vector_of(&self, tokens: &[String]) -> SparseVector {
        let mut weights = SparseVector::new();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *weights.entry(index).or_insert(0.0) += 1.0;
            }
        }
        for (index, weight) in weights.iter_mut() {
            *weight *= self.idf[*index];
        }
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in weights.values_mut() {
                *weight /= norm;
            }
        }
        weights
    }
}

/// Dot product of two l2-normalized sparse vectors.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(index, weight)| large.get(index).map(|other| weight * other))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_language_names() {
        let tokens = tokenize("C++ and C# and R programming");
        assert_eq!(tokens, ["c++", "c#", "r", "programming"]);
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_punctuation() {
        let tokens = tokenize("Learn the fundamentals of machine-learning!");
        assert_eq!(tokens, ["learn", "fundamentals", "machine", "learning"]);
    }

    #[test]
    fn test_identical_documents_have_unit_similarity() {
        let space = TfIdfSpace::build(&["python sql statistics", "patient care nursing"]);
        let scores = space.similarities("python sql statistics");
        assert!((scores[0] - 1.0).abs() < 1e-9, "got {}", scores[0]);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_partial_overlap_scores_between_zero_and_one() {
        let space = TfIdfSpace::build(&["python sql statistics", "python java web"]);
        let scores = space.similarities("python");
        assert!(scores[0] > 0.0 && scores[0] < 1.0);
        assert!(scores[1] > 0.0 && scores[1] < 1.0);
    }

    #[test]
    fn test_out_of_vocabulary_query_is_zero_everywhere() {
        let space = TfIdfSpace::build(&["accounting auditing"]);
        let scores = space.similarities("kubernetes");
        assert_eq!(scores, [0.0]);
        assert!(space.embed("kubernetes").is_empty());
    }

    #[test]
    fn test_empty_corpus_is_harmless() {
        let space = TfIdfSpace::build(&[] as &[&str]);
        assert!(space.is_empty());
        assert!(space.similarities("python").is_empty());
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        // "python" appears in both documents, "nursing" in one.
        let space = TfIdfSpace::build(&["python nursing", "python java"]);
        let query = space.embed("python nursing");
        let scores = space.similarities("python nursing");
        assert!(!query.is_empty());
        assert!(
            scores[0] > scores[1],
            "document sharing the rare term should win: {scores:?}"
        );
    }
}
