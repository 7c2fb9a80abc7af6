//! User profile construction for the pathwise career engine.
//!
//! A [`UserProfile`] is the unified view of everything known about a user:
//! the skill union of a parsed resume and explicitly confirmed skills, the
//! resume's education and experience entries, and optional personality
//! assessment results. Profiles are built fresh per request and never
//! persisted by the engine.
//!
//! Resume parsing itself happens outside this crate; [`ResumeData`] models
//! the parser's output shape so any parser producing it plugs in.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use pathwise_catalog::RiasecScores;

/// Education keywords indicating doctoral-level study.
const DOCTORAL_KEYWORDS: &[&str] = &["phd", "doctorate"];

/// Education keywords indicating a master's degree.
const MASTERS_KEYWORDS: &[&str] = &["master"];

/// Education keywords indicating undergraduate study.
const BACHELORS_KEYWORDS: &[&str] = &["bachelor", "university", "college"];

/// Soft-skill keywords that signal leadership experience.
const LEADERSHIP_KEYWORDS: &[&str] = &[
    "leadership",
    "management",
    "lead",
    "supervise",
    "direct",
    "coordinate",
];

/// Contact details extracted from a resume.
///
/// Carried through for completeness of the parser contract; the engine
/// itself never reads these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// LinkedIn profile slug or URL.
    pub linkedin: String,
}

/// Skills extracted from a resume, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeSkills {
    /// Technical skills, e.g. "python".
    pub technical: Vec<String>,
    /// Soft skills, e.g. "communication".
    pub soft: Vec<String>,
}

/// Output shape of an external resume parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    /// Extracted contact information.
    pub contact_info: ContactInfo,
    /// Education entries, one free-form line each.
    pub education: Vec<String>,
    /// Experience entries, one free-form section each.
    pub experience: Vec<String>,
    /// Extracted skills.
    pub skills: ResumeSkills,
}

/// Skills the user confirmed directly, independent of any resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmedSkills {
    /// Confirmed technical skills.
    pub technical: Vec<String>,
    /// Confirmed soft skills.
    pub soft: Vec<String>,
}

/// Personality assessment results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityResults {
    /// Holland RIASEC interest scores, when the assessment produced them.
    pub riasec: Option<RiasecScores>,
    /// Preferred learning style, e.g. "visual", "reading", "practical".
    pub learning_style: String,
    /// Work-environment preferences on a 1-5 scale, keyed by facet name.
    pub work_environment: BTreeMap<String, u8>,
}

/// Education tier inferred from a profile's education entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationTier {
    /// No degree-level keywords found.
    Low,
    /// Undergraduate study.
    Medium,
    /// Master's or doctoral study.
    High,
}

/// Unified view of a user built from resume, confirmed skills, and
/// personality inputs.
///
/// Skill sets are lowercased, trimmed, and deduplicated at construction so
/// every downstream comparison is case-insensitive by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Technical skills, normalized.
    pub technical_skills: BTreeSet<String>,
    /// Soft skills, normalized.
    pub soft_skills: BTreeSet<String>,
    /// Education entries as provided.
    pub education: Vec<String>,
    /// Experience entries as provided.
    pub experience: Vec<String>,
    /// Personality assessment results, if taken.
    pub personality: Option<PersonalityResults>,
}

fn normalized(raw: &[String]) -> impl Iterator<Item = String> + '_ {
    raw.iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
}

/// Build a unified profile from the available inputs.
///
/// Technical and soft skills are the case-insensitive union of confirmed
/// and resume skills. Education and experience pass through from the
/// resume. Absent inputs yield empty collections; this never fails.
pub fn build_profile(
    resume: Option<&ResumeData>,
    confirmed: &ConfirmedSkills,
    personality: Option<PersonalityResults>,
) -> UserProfile {
    let mut technical_skills: BTreeSet<String> = normalized(&confirmed.technical).collect();
    let mut soft_skills: BTreeSet<String> = normalized(&confirmed.soft).collect();

    let mut education = Vec::new();
    let mut experience = Vec::new();

    if let Some(resume) = resume {
        technical_skills.extend(normalized(&resume.skills.technical));
        soft_skills.extend(normalized(&resume.skills.soft));
        education = resume.education.clone();
        experience = resume.experience.clone();
    }

    UserProfile {
        technical_skills,
        soft_skills,
        education,
        experience,
        personality,
    }
}

impl UserProfile {
    /// All skills, technical then soft.
    pub fn all_skills(&self) -> impl Iterator<Item = &str> {
        self.technical_skills
            .iter()
            .chain(&self.soft_skills)
            .map(String::as_str)
    }

    /// All skills joined into one document for vectorization.
    pub fn skill_text(&self) -> String {
        self.all_skills().collect::<Vec<_>>().join(" ")
    }

    /// Owned union of technical and soft skills.
    pub fn competency_set(&self) -> BTreeSet<String> {
        self.all_skills().map(str::to_string).collect()
    }

    fn education_text(&self) -> String {
        self.education.join(" ").to_lowercase()
    }

    /// Education tier inferred from the education entries.
    pub fn education_tier(&self) -> EducationTier {
        let text = self.education_text();
        let contains_any =
            |keywords: &[&str]| keywords.iter().any(|keyword| text.contains(keyword));

        if contains_any(DOCTORAL_KEYWORDS) || contains_any(MASTERS_KEYWORDS) {
            EducationTier::High
        } else if contains_any(BACHELORS_KEYWORDS) {
            EducationTier::Medium
        } else {
            EducationTier::Low
        }
    }

    /// Multiplier applied to per-skill development time estimates.
    ///
    /// Higher attainment shortens the estimate: 0.7 for doctoral study,
    /// 0.8 for a master's, 0.9 for a bachelor's, 1.0 otherwise.
    pub fn education_factor(&self) -> f64 {
        let text = self.education_text();
        let contains_any =
            |keywords: &[&str]| keywords.iter().any(|keyword| text.contains(keyword));

        if contains_any(DOCTORAL_KEYWORDS) {
            0.7
        } else if contains_any(MASTERS_KEYWORDS) {
            0.8
        } else if contains_any(BACHELORS_KEYWORDS) {
            0.9
        } else {
            1.0
        }
    }

    /// Whether any soft skill suggests leadership experience.
    ///
    /// Substring match, so "team leadership" and "project management"
    /// both qualify.
    pub fn has_leadership_skills(&self) -> bool {
        self.soft_skills.iter().any(|skill| {
            LEADERSHIP_KEYWORDS
                .iter()
                .any(|keyword| skill.contains(keyword))
        })
    }

    /// Declared learning style, when the assessment provided one.
    pub fn learning_style(&self) -> Option<&str> {
        self.personality
            .as_ref()
            .map(|p| p.learning_style.as_str())
            .filter(|style| !style.is_empty())
    }

    /// RIASEC scores, when the assessment provided them.
    pub fn riasec(&self) -> Option<&RiasecScores> {
        self.personality.as_ref().and_then(|p| p.riasec.as_ref())
    }
}

/// Serialized request payload carrying everything needed to build a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    /// Parsed resume, if one was uploaded.
    pub resume: Option<ResumeData>,
    /// Skills the user confirmed directly.
    pub skills: ConfirmedSkills,
    /// Personality assessment results, if taken.
    pub personality: Option<PersonalityResults>,
}

impl ProfileRequest {
    /// Build the unified profile from this request.
    pub fn into_profile(self) -> UserProfile {
        build_profile(self.resume.as_ref(), &self.skills, self.personality)
    }
}
