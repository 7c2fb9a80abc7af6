//! Occupation matching over the career catalog.
//!
//! Scores every catalog occupation against a user profile and returns the
//! strongest matches as self-contained recommendation records:
//! - Lexical strategy: tf-idf cosine similarity between the profile's
//!   skill text and each occupation's combined requirement text.
//! - Supervised strategy: per-title naive Bayes affinities learned from
//!   labeled posting data, with lexical fallback when training fails.
//! - Optional RIASEC blending when the profile carries assessment scores.

mod classifier;
mod explain;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use pathwise_catalog::{CareerCatalog, HiringCompany, Occupation, SalaryRange};
use pathwise_profile::UserProfile;

use crate::text::TfIdfSpace;

pub use classifier::{TitleClassifier, TrainError, TrainedModel, DEFAULT_AFFINITY};
pub use explain::explain_recommendation;

/// Weight of the skill-based score in the personality blend.
pub const BASE_SCORE_WEIGHT: f64 = 0.7;
/// Weight of the RIASEC affinity in the personality blend.
pub const PERSONALITY_WEIGHT: f64 = 0.3;
/// Hiring companies attached to each recommendation.
pub const TOP_COMPANY_LIMIT: usize = 5;

/// How occupation base scores are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Tf-idf cosine similarity against occupation requirement text.
    #[default]
    Lexical,
    /// Naive Bayes affinity trained on labeled posting data.
    Supervised,
}

/// Tuning knobs for the matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Scoring strategy for the base score.
    pub strategy: MatchStrategy,
    /// Blend weight applied to the base score.
    pub base_weight: f64,
    /// Blend weight applied to the RIASEC affinity.
    pub personality_weight: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            strategy: MatchStrategy::default(),
            base_weight: BASE_SCORE_WEIGHT,
            personality_weight: PERSONALITY_WEIGHT,
        }
    }
}

/// A scored occupation match with everything needed to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// O*NET-SOC code of the matched occupation.
    pub occupation_code: String,
    /// Occupation title.
    pub title: String,
    /// Short occupation description.
    pub description: String,
    /// Blended match score on a 0..100 scale.
    pub match_score: f64,
    /// Share of the occupation's skills the profile already covers.
    pub skill_match_percentage: f64,
    /// Occupation skills the profile possesses, in catalog order.
    pub matching_skills: Vec<String>,
    /// Occupation skills the profile lacks, in catalog order.
    pub missing_skills: Vec<String>,
    /// Annual salary range in USD.
    pub salary_range: SalaryRange,
    /// Projected growth outlook.
    pub growth_outlook: String,
    /// Typical education requirement.
    pub education_required: String,
    /// Companies actively hiring for this title.
    pub top_companies: Vec<HiringCompany>,
}

/// Matches user profiles to catalog occupations.
pub struct OccupationMatcher<'a> {
    catalog: &'a CareerCatalog,
    classifier: TitleClassifier,
    requirement_space: TfIdfSpace,
    config: MatcherConfig,
}

impl<'a> OccupationMatcher<'a> {
    /// Build a matcher with the default configuration.
    pub fn new(catalog: &'a CareerCatalog) -> Self {
        Self::with_config(catalog, MatcherConfig::default())
    }

    /// Build a matcher with an explicit configuration.
    pub fn with_config(catalog: &'a CareerCatalog, config: MatcherConfig) -> Self {
        let requirement_texts: Vec<String> = catalog
            .occupations()
            .iter()
            .map(Occupation::requirement_text)
            .collect();
        Self {
            catalog,
            classifier: TitleClassifier::from_catalog(catalog),
            requirement_space: TfIdfSpace::build(&requirement_texts),
            config,
        }
    }

    /// Active matcher configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Score and rank occupations for a profile, strongest first.
    ///
    /// Scores land on a 0..100 scale. When the profile carries RIASEC
    /// results the base score is blended with the occupation's RIASEC
    /// affinity at the configured weights. Ties keep catalog order.
    pub fn recommend(&self, profile: &UserProfile, limit: usize) -> Vec<Recommendation> {
        if limit == 0 || self.catalog.occupations().is_empty() {
            return Vec::new();
        }

        let skill_text = profile.skill_text();
        let mut scored = match self.config.strategy {
            MatchStrategy::Lexical => self.lexical_scores(&skill_text),
            MatchStrategy::Supervised => match self.supervised_scores(&skill_text) {
                Ok(scores) => scores,
                Err(error) => {
                    tracing::warn!(%error, "classifier unavailable, falling back to lexical scoring");
                    self.lexical_scores(&skill_text)
                }
            },
        };

        if let Some(riasec) = profile.riasec() {
            for (occupation, score) in &mut scored {
                let affinity = riasec.affinity(&occupation.riasec);
                *score = self.config.base_weight * *score + self.config.personality_weight * affinity;
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(occupation, score)| self.build_recommendation(occupation, score, profile))
            .collect()
    }

    /// Per-term evidence behind one title's supervised estimator.
    ///
    /// Empty when the title was never trained on or training fails.
    pub fn feature_importance(&self, job_title: &str) -> Vec<(String, f64)> {
        self.classifier.feature_importance(job_title)
    }

    fn lexical_scores(&self, skill_text: &str) -> Vec<(&'a Occupation, f64)> {
        self.catalog
            .occupations()
            .iter()
            .zip(self.requirement_space.similarities(skill_text))
            .map(|(occupation, similarity)| (occupation, similarity * 100.0))
            .collect()
    }

    fn supervised_scores(&self, skill_text: &str) -> Result<Vec<(&'a Occupation, f64)>, TrainError> {
        let affinities = self.classifier.predict_affinities(skill_text)?;
        for title in affinities.keys() {
            if self.catalog.occupation_by_title(title).is_none() {
                tracing::debug!(title = %title, "trained title has no catalog occupation");
            }
        }
        // Assembled in catalog order; the stable sort keeps that order
        // for tied scores.
        Ok(self
            .catalog
            .occupations()
            .iter()
            .filter_map(|occupation| {
                affinities
                    .iter()
                    .find(|(title, _)| title.eq_ignore_ascii_case(&occupation.title))
                    .map(|(_, affinity)| (occupation, *affinity * 100.0))
            })
            .collect())
    }

    fn build_recommendation(
        &self,
        occupation: &Occupation,
        match_score: f64,
        profile: &UserProfile,
    ) -> Recommendation {
        let possessed = profile.competency_set();
        let mut matching_skills = Vec::new();
        let mut missing_skills = Vec::new();
        for skill in &occupation.skills {
            let normalized = skill.to_lowercase();
            if possessed.contains(&normalized) {
                matching_skills.push(normalized);
            } else {
                missing_skills.push(normalized);
            }
        }
        let skill_match_percentage = if occupation.skills.is_empty() {
            0.0
        } else {
            matching_skills.len() as f64 / occupation.skills.len() as f64 * 100.0
        };

        Recommendation {
            occupation_code: occupation.code.clone(),
            title: occupation.title.clone(),
            description: occupation.description.clone(),
            match_score,
            skill_match_percentage,
            matching_skills,
            missing_skills,
            salary_range: occupation.salary_range,
            growth_outlook: occupation.growth_outlook.clone(),
            education_required: occupation.education_required.clone(),
            top_companies: self.catalog.top_companies(&occupation.title, TOP_COMPANY_LIMIT),
        }
    }
}
