//! The immutable career catalog and its read interface.
//!
//! All fixture documents are embedded at compile time and parsed once in
//! [`CareerCatalog::load`]. Components hold a shared reference to the loaded
//! catalog; nothing mutates it after startup.

use indexmap::IndexMap;
use thiserror::Error;

use crate::similarity::{best_match, DEFAULT_THRESHOLD};
use crate::types::{Course, HiringCompany, Occupation, TrainingRecord};

const OCCUPATIONS_JSON: &str = include_str!("../data/occupations.json");
const COURSES_JSON: &str = include_str!("../data/courses.json");
const COMPANIES_JSON: &str = include_str!("../data/companies.json");
const PROGRESSIONS_JSON: &str = include_str!("../data/progressions.json");
const TRANSITIONS_JSON: &str = include_str!("../data/transitions.json");
const TRAINING_JSON: &str = include_str!("../data/training.json");

/// Errors raised while loading the embedded catalog fixtures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// A fixture document failed to deserialize.
    #[error("malformed {name} fixture: {source}")]
    MalformedFixture {
        /// Fixture name, e.g. "occupations".
        name: &'static str,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A fixture parsed but violated a catalog invariant.
    #[error("invalid {name} fixture: {reason}")]
    InvalidFixture {
        /// Fixture name.
        name: &'static str,
        /// What was wrong.
        reason: String,
    },
}

fn parse_fixture<T: serde::de::DeserializeOwned>(
    name: &'static str,
    raw: &str,
) -> Result<T, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::MalformedFixture { name, source })
}

/// Career progression chains keyed by starting role.
pub type ProgressionMap = IndexMap<String, Vec<Vec<String>>>;

/// Role-to-role transition probabilities.
pub type TransitionMatrix = IndexMap<String, IndexMap<String, f64>>;

/// Immutable snapshot of every data source the engine reads.
///
/// Maps preserve fixture insertion order so lookups and iteration stay
/// deterministic across runs.
#[derive(Debug, Clone)]
pub struct CareerCatalog {
    occupations: Vec<Occupation>,
    courses: Vec<Course>,
    companies: IndexMap<String, Vec<HiringCompany>>,
    progressions: ProgressionMap,
    transitions: TransitionMatrix,
    training: Vec<TrainingRecord>,
}

impl CareerCatalog {
    /// Parse the embedded fixtures into a catalog.
    pub fn load() -> Result<Self, CatalogError> {
        let occupations: Vec<Occupation> = parse_fixture("occupations", OCCUPATIONS_JSON)?;

        let mut seen = std::collections::HashSet::new();
        for occupation in &occupations {
            if !seen.insert(occupation.code.as_str()) {
                return Err(CatalogError::InvalidFixture {
                    name: "occupations",
                    reason: format!("duplicate occupation code {}", occupation.code),
                });
            }
        }

        let catalog = Self {
            occupations,
            courses: parse_fixture("courses", COURSES_JSON)?,
            companies: parse_fixture("companies", COMPANIES_JSON)?,
            progressions: parse_fixture("progressions", PROGRESSIONS_JSON)?,
            transitions: parse_fixture("transitions", TRANSITIONS_JSON)?,
            training: parse_fixture("training", TRAINING_JSON)?,
        };

        tracing::debug!(
            occupations = catalog.occupations.len(),
            courses = catalog.courses.len(),
            training_records = catalog.training.len(),
            "career catalog loaded"
        );

        Ok(catalog)
    }

    /// Build a catalog from already-constructed parts.
    ///
    /// Intended for tests and for callers substituting their own data
    /// provider behind the same read interface.
    pub fn from_parts(
        occupations: Vec<Occupation>,
        courses: Vec<Course>,
        companies: IndexMap<String, Vec<HiringCompany>>,
        progressions: ProgressionMap,
        transitions: TransitionMatrix,
        training: Vec<TrainingRecord>,
    ) -> Self {
        Self {
            occupations,
            courses,
            companies,
            progressions,
            transitions,
            training,
        }
    }

    /// All catalog occupations, in fixture order.
    pub fn occupations(&self) -> &[Occupation] {
        &self.occupations
    }

    /// Look up an occupation by its unique code.
    pub fn occupation_by_code(&self, code: &str) -> Option<&Occupation> {
        self.occupations.iter().find(|occ| occ.code == code)
    }

    /// Look up an occupation by title, ignoring case.
    pub fn occupation_by_title(&self, title: &str) -> Option<&Occupation> {
        self.occupations
            .iter()
            .find(|occ| occ.title.eq_ignore_ascii_case(title))
    }

    /// All available courses, in fixture order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Top companies hiring for a job title.
    ///
    /// Falls back to the most similar cataloged title when the exact key is
    /// absent; returns an empty list when nothing clears the similarity
    /// threshold.
    pub fn top_companies(&self, job_title: &str, limit: usize) -> Vec<HiringCompany> {
        let entries = self.companies.get(job_title).or_else(|| {
            best_match(
                job_title,
                self.companies.keys().map(String::as_str),
                DEFAULT_THRESHOLD,
            )
            .and_then(|title| {
                tracing::debug!(query = %job_title, matched = %title, "fuzzy company lookup");
                self.companies.get(&title)
            })
        });

        match entries {
            Some(entries) => entries.iter().take(limit).cloned().collect(),
            None => {
                tracing::debug!(query = %job_title, "no company data for title");
                Vec::new()
            }
        }
    }

    /// Career progression chains keyed by starting role.
    pub fn career_progressions(&self) -> &ProgressionMap {
        &self.progressions
    }

    /// Progression chains for an exact starting-role key.
    pub fn progressions_for(&self, role: &str) -> Option<&[Vec<String>]> {
        self.progressions.get(role).map(Vec::as_slice)
    }

    /// Role-to-role transition probabilities.
    pub fn transition_matrix(&self) -> &TransitionMatrix {
        &self.transitions
    }

    /// Labeled postings used to train the supervised title classifier.
    pub fn training_records(&self) -> &[TrainingRecord] {
        &self.training
    }
}
