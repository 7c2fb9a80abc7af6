//! Record types for the occupation and labor-market catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Salary distribution for an occupation, in whole dollars per year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    /// Lower bound of the typical range.
    pub min: u32,
    /// Upper bound of the typical range.
    pub max: u32,
    /// Median salary.
    pub median: u32,
}

/// Holland RIASEC interest profile, each dimension scored 0-100.
///
/// Deserializes from either lowercase or capitalized dimension names so
/// assessment payloads and catalog fixtures share one type. Dimensions
/// absent from a payload score zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiasecScores {
    /// Preference for hands-on, practical work.
    #[serde(alias = "Realistic")]
    pub realistic: f64,
    /// Preference for analytical, research-oriented work.
    #[serde(alias = "Investigative")]
    pub investigative: f64,
    /// Preference for creative, expressive work.
    #[serde(alias = "Artistic")]
    pub artistic: f64,
    /// Preference for helping and teaching others.
    #[serde(alias = "Social")]
    pub social: f64,
    /// Preference for leading and persuading.
    #[serde(alias = "Enterprising")]
    pub enterprising: f64,
    /// Preference for structured, detail-oriented work.
    #[serde(alias = "Conventional")]
    pub conventional: f64,
}

impl RiasecScores {
    /// Dimension scores in canonical RIASEC order.
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.realistic,
            self.investigative,
            self.artistic,
            self.social,
            self.enterprising,
            self.conventional,
        ]
    }

    /// Affinity between two profiles, normalized back into 0-100.
    ///
    /// Each dimension contributes `(a * b) / 100`; the mean over the six
    /// dimensions keeps the result in the same range as the inputs, so it
    /// can be blended directly with other 0-100 scores.
    pub fn affinity(&self, other: &RiasecScores) -> f64 {
        let pairs = self.as_array().into_iter().zip(other.as_array());
        pairs.map(|(a, b)| (a * b) / 100.0).sum::<f64>() / 6.0
    }
}

/// A catalog occupation with its requirement profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occupation {
    /// O*NET-style occupation code, unique within the catalog.
    pub code: String,
    /// Display title.
    pub title: String,
    /// Narrative description of the role.
    pub description: String,
    /// Required technical skills.
    pub skills: Vec<String>,
    /// Required cognitive and physical abilities.
    pub abilities: Vec<String>,
    /// Required knowledge domains.
    pub knowledge: Vec<String>,
    /// Typical salary distribution.
    pub salary_range: SalaryRange,
    /// Growth outlook label, e.g. "Faster than average".
    pub growth_outlook: String,
    /// Typical education requirement, e.g. "Bachelor's degree".
    pub education_required: String,
    /// RIASEC interest profile for the occupation.
    #[serde(rename = "riasec_codes")]
    pub riasec: RiasecScores,
}

impl Occupation {
    /// Skills, abilities, and knowledge joined into one lowercase document.
    ///
    /// This is the text the lexical matcher embeds for each occupation.
    pub fn requirement_text(&self) -> String {
        let mut text = String::new();
        for term in self
            .skills
            .iter()
            .chain(&self.abilities)
            .chain(&self.knowledge)
        {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&term.to_lowercase());
        }
        text
    }

    /// Lowercased union of skills, abilities, and knowledge.
    pub fn required_competencies(&self) -> BTreeSet<String> {
        self.skills
            .iter()
            .chain(&self.abilities)
            .chain(&self.knowledge)
            .map(|term| term.to_lowercase())
            .collect()
    }
}

/// A course offered by an external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Stable course identifier.
    pub id: u32,
    /// Course title.
    pub title: String,
    /// Provider name, e.g. "Coursera (Google)".
    pub provider: String,
    /// Enrollment URL.
    pub url: String,
    /// Marketing description.
    pub description: String,
    /// Skills the course teaches.
    pub skills: Vec<String>,
    /// Delivery format, e.g. "Video, Projects".
    pub format: String,
    /// Advertised duration, e.g. "40 hours".
    pub duration: String,
    /// Difficulty label: beginner, intermediate, or advanced.
    pub difficulty: String,
    /// Advertised cost.
    pub cost: String,
}

/// A company actively hiring for a given occupation title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringCompany {
    /// Company name.
    pub name: String,
    /// Relative hiring activity, 0-100.
    pub hiring_frequency: u32,
    /// Average advertised salary in dollars per year.
    pub avg_salary: u32,
    /// Headquarters location.
    pub location: String,
}

/// One labeled example for the supervised title classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Hiring company the posting came from.
    pub company: String,
    /// Job title label.
    pub job_title: String,
    /// Skills listed in the posting.
    pub skills: Vec<String>,
}

impl TrainingRecord {
    /// Skills joined into one lowercase document for vectorization.
    pub fn skill_text(&self) -> String {
        self.skills.join(" ").to_lowercase()
    }
}
