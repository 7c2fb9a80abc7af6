//! Supervised job-title classifier over labeled posting data.
//!
//! One binary naive Bayes estimator per job title, fit over the
//! bag-of-terms skill text of the catalog's training records. Training is
//! deterministic and happens at most once per classifier instance: the
//! fitted model sits behind a lock and every caller shares the same
//! [`Arc`]. Training failures are reported as values so the matcher can
//! fall back to lexical scoring instead of aborting a request.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use thiserror::Error;

use pathwise_catalog::{CareerCatalog, TrainingRecord};

use crate::text::tokenize;

/// Affinity reported for every title when the input shares no vocabulary
/// with the training corpus.
pub const DEFAULT_AFFINITY: f64 = 0.5;

/// Errors raised while fitting the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TrainError {
    /// The training dataset had no records.
    #[error("training dataset is empty")]
    EmptyDataset,
    /// No record contributed a single skill token.
    #[error("training dataset produced no vocabulary")]
    EmptyVocabulary,
}

/// Lazily-trained title classifier.
pub struct TitleClassifier {
    records: Vec<TrainingRecord>,
    model: RwLock<Option<Arc<TrainedModel>>>,
}

impl TitleClassifier {
    /// Create a classifier over an explicit dataset.
    pub fn new(records: Vec<TrainingRecord>) -> Self {
        Self {
            records,
            model: RwLock::new(None),
        }
    }

    /// Create a classifier over the catalog's training records.
    pub fn from_catalog(catalog: &CareerCatalog) -> Self {
        Self::new(catalog.training_records().to_vec())
    }

    /// Fit the model if it has not been fit yet and return it.
    ///
    /// Idempotent: repeat calls return the same shared model. Concurrent
    /// callers serialize on the write lock; exactly one performs the fit.
    pub fn ensure_trained(&self) -> Result<Arc<TrainedModel>, TrainError> {
        if let Some(model) = self.model.read().as_ref() {
            return Ok(Arc::clone(model));
        }

        let mut slot = self.model.write();
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }

        tracing::debug!(records = self.records.len(), "training title classifier");
        let model = Arc::new(TrainedModel::fit(&self.records)?);
        tracing::debug!(
            titles = model.titles().len(),
            vocabulary = model.vocabulary_len(),
            "title classifier trained"
        );
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Predict per-title affinity for a skill text.
    ///
    /// Trains on first use. See [`TrainedModel::predict_affinities`].
    pub fn predict_affinities(&self, skill_text: &str) -> Result<IndexMap<String, f64>, TrainError> {
        Ok(self.ensure_trained()?.predict_affinities(skill_text))
    }

    /// Per-term importance for one title's estimator, most indicative
    /// first. Empty for unknown titles or when training fails.
    pub fn feature_importance(&self, job_title: &str) -> Vec<(String, f64)> {
        match self.ensure_trained() {
            Ok(model) => model.feature_importance(job_title),
            Err(_) => Vec::new(),
        }
    }
}

/// A fitted per-title naive Bayes model.
pub struct TrainedModel {
    vocabulary: HashMap<String, usize>,
    titles: Vec<String>,
    estimators: Vec<TitleEstimator>,
}

/// Binary one-vs-rest estimator for a single title.
struct TitleEstimator {
    log_prior_positive: f64,
    log_prior_negative: f64,
    positive_log_likelihood: Vec<f64>,
    negative_log_likelihood: Vec<f64>,
}

impl TrainedModel {
    fn fit(records: &[TrainingRecord]) -> Result<Self, TrainError> {
        if records.is_empty() {
            return Err(TrainError::EmptyDataset);
        }

        let tokenized: Vec<Vec<String>> = records
            .iter()
            .map(|record| tokenize(&record.skill_text()))
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                let next_index = vocabulary.len();
                vocabulary.entry(token.clone()).or_insert(next_index);
            }
        }
        if vocabulary.is_empty() {
            return Err(TrainError::EmptyVocabulary);
        }

        let mut titles: Vec<String> = Vec::new();
        for record in records {
            if !titles.iter().any(|t| t == &record.job_title) {
                titles.push(record.job_title.clone());
            }
        }

        let vocab_len = vocabulary.len();
        let counts: Vec<Vec<f64>> = tokenized
            .iter()
            .map(|tokens| {
                let mut row = vec![0.0; vocab_len];
                for token in tokens {
                    if let Some(&index) = vocabulary.get(token) {
                        row[index] += 1.0;
                    }
                }
                row
            })
            .collect();

        let total = records.len() as f64;
        let estimators = titles
            .iter()
            .map(|title| {
                let mut positive_counts = vec![0.0; vocab_len];
                let mut negative_counts = vec![0.0; vocab_len];
                let mut positive_docs = 0.0;

                for (record, row) in records.iter().zip(&counts) {
                    let target = if &record.job_title == title {
                        positive_docs += 1.0;
                        &mut positive_counts
                    } else {
                        &mut negative_counts
                    };
                    for (index, count) in row.iter().enumerate() {
                        target[index] += count;
                    }
                }

                TitleEstimator::fit(
                    &positive_counts,
                    &negative_counts,
                    positive_docs,
                    total,
                    vocab_len,
                )
            })
            .collect();

        Ok(Self {
            vocabulary,
            titles,
            estimators,
        })
    }

    /// Titles the model can score, in first-appearance order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Predict the positive-class probability for every known title.
    ///
    /// Inputs sharing no terms with the training vocabulary cannot be
    /// scored meaningfully; every title then reports [`DEFAULT_AFFINITY`].
    pub fn predict_affinities(&self, skill_text: &str) -> IndexMap<String, f64> {
        // Ordered counts keep the log-likelihood sums in one fixed order,
        // so repeat predictions are bit-identical.
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(skill_text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        if counts.is_empty() {
            return self
                .titles
                .iter()
                .map(|title| (title.clone(), DEFAULT_AFFINITY))
                .collect();
        }

        self.titles
            .iter()
            .zip(&self.estimators)
            .map(|(title, estimator)| (title.clone(), estimator.affinity(&counts)))
            .collect()
    }

    /// Per-term log-odds importance for one title, most indicative first.
    pub fn feature_importance(&self, job_title: &str) -> Vec<(String, f64)> {
        let Some(index) = self
            .titles
            .iter()
            .position(|title| title.eq_ignore_ascii_case(job_title))
        else {
            return Vec::new();
        };
        let estimator = &self.estimators[index];

        let mut importance: Vec<(String, f64)> = self
            .vocabulary
            .iter()
            .map(|(term, &term_index)| {
                let weight = estimator.positive_log_likelihood[term_index]
                    - estimator.negative_log_likelihood[term_index];
                (term.clone(), weight)
            })
            .collect();

        importance.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        importance
    }
}

impl TitleEstimator {
    fn fit(
        positive_counts: &[f64],
        negative_counts: &[f64],
        positive_docs: f64,
        total_docs: f64,
        vocab_len: usize,
    ) -> Self {
        let positive_total: f64 = positive_counts.iter().sum();
        let negative_total: f64 = negative_counts.iter().sum();
        let vocab = vocab_len as f64;

        // Add-one smoothing on both term counts and document priors keeps
        // every log finite even for single-title datasets.
        let positive_log_likelihood = positive_counts
            .iter()
            .map(|&count| ((count + 1.0) / (positive_total + vocab)).ln())
            .collect();
        let negative_log_likelihood = negative_counts
            .iter()
            .map(|&count| ((count + 1.0) / (negative_total + vocab)).ln())
            .collect();

        Self {
            log_prior_positive: ((positive_docs + 1.0) / (total_docs + 2.0)).ln(),
            log_prior_negative: ((total_docs - positive_docs + 1.0) / (total_docs + 2.0)).ln(),
            positive_log_likelihood,
            negative_log_likelihood,
        }
    }

    fn affinity(&self, counts: &BTreeMap<usize, f64>) -> f64 {
        let mut log_positive = self.log_prior_positive;
        let mut log_negative = self.log_prior_negative;
        for (&index, &count) in counts {
            log_positive += count * self.positive_log_likelihood[index];
            log_negative += count * self.negative_log_likelihood[index];
        }
        sigmoid(log_positive - log_negative)
    }
}

fn sigmoid(logit: f64) -> f64 {
    if logit >= 0.0 {
        1.0 / (1.0 + (-logit).exp())
    } else {
        let exp = logit.exp();
        exp / (1.0 + exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_catalog::CareerCatalog;

    fn record(title: &str, skills: &[&str]) -> TrainingRecord {
        TrainingRecord {
            company: "Acme".into(),
            job_title: title.into(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_ensure_trained_is_idempotent() {
        let classifier = TitleClassifier::new(vec![
            record("Data Scientist", &["python", "statistics"]),
            record("Accountant", &["accounting", "excel"]),
        ]);
        let first = classifier.ensure_trained().unwrap();
        let second = classifier.ensure_trained().unwrap();
        assert!(Arc::ptr_eq(&first, &second), "repeat calls must share one model");
    }

    #[test]
    fn test_empty_dataset_fails_to_train() {
        let classifier = TitleClassifier::new(Vec::new());
        assert_eq!(classifier.ensure_trained().err(), Some(TrainError::EmptyDataset));
    }

    #[test]
    fn test_dataset_without_tokens_fails_to_train() {
        let classifier = TitleClassifier::new(vec![record("Mime", &[])]);
        assert_eq!(
            classifier.ensure_trained().err(),
            Some(TrainError::EmptyVocabulary)
        );
    }

    #[test]
    fn test_affinities_cover_every_title_in_range() {
        let catalog = CareerCatalog::load().unwrap();
        let classifier = TitleClassifier::from_catalog(&catalog);
        let affinities = classifier
            .predict_affinities("python sql machine learning statistics")
            .unwrap();

        assert_eq!(affinities.len(), 9, "one affinity per distinct training title");
        for (title, affinity) in &affinities {
            assert!(
                (0.0..=1.0).contains(affinity),
                "{title} affinity out of range: {affinity}"
            );
        }
    }

    #[test]
    fn test_data_skills_prefer_data_scientist_over_teacher() {
        let catalog = CareerCatalog::load().unwrap();
        let classifier = TitleClassifier::from_catalog(&catalog);
        let affinities = classifier
            .predict_affinities("python sql machine learning statistics")
            .unwrap();

        let data_scientist = affinities["Data Scientist"];
        let teacher = affinities["Elementary School Teacher"];
        assert!(
            data_scientist > teacher,
            "expected {data_scientist} > {teacher}"
        );
    }

    #[test]
    fn test_unknown_vocabulary_reports_default_affinity() {
        let classifier = TitleClassifier::new(vec![
            record("Data Scientist", &["python"]),
            record("Accountant", &["excel"]),
        ]);
        let affinities = classifier.predict_affinities("falconry").unwrap();
        for (_, affinity) in &affinities {
            assert_eq!(*affinity, DEFAULT_AFFINITY);
        }
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let catalog = CareerCatalog::load().unwrap();
        let classifier = TitleClassifier::from_catalog(&catalog);
        let first = classifier.predict_affinities("python sql").unwrap();
        let second = classifier.predict_affinities("python sql").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_feature_importance_sorted_and_scoped() {
        let catalog = CareerCatalog::load().unwrap();
        let classifier = TitleClassifier::from_catalog(&catalog);

        let importance = classifier.feature_importance("Data Scientist");
        assert!(!importance.is_empty());
        for pair in importance.windows(2) {
            assert!(pair[0].1 >= pair[1].1, "importance must be sorted descending");
        }
        let top_terms: Vec<&str> = importance.iter().take(10).map(|(t, _)| t.as_str()).collect();
        assert!(
            top_terms.contains(&"statistics") || top_terms.contains(&"machine"),
            "expected a core data-science term near the top, got {top_terms:?}"
        );

        assert!(classifier.feature_importance("Falconer").is_empty());
    }
}
