//! Skill-gap analysis and development planning.
//!
//! For each recommended occupation, compares the user's competencies
//! against the occupation's full requirement universe (skills, abilities,
//! and knowledge), categorizes what is missing by facet, orders the gaps
//! by how widely the catalog demands them, and turns the ordered gaps
//! into a time-boxed development plan.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use pathwise_catalog::{CareerCatalog, Occupation};
use pathwise_profile::UserProfile;

use crate::matcher::Recommendation;

/// Gaps kept after prioritization.
const PRIORITY_LIMIT: usize = 10;

/// Months of focused learning budgeted per missing skill.
const BASE_MONTHS_PER_SKILL: f64 = 2.0;

/// Missing requirements grouped by catalog facet.
///
/// Facets are not exclusive: a token required as both a skill and a
/// knowledge area appears under both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSkills {
    /// Missing entries from the skills facet.
    pub technical: Vec<String>,
    /// Missing entries from the abilities facet.
    pub abilities: Vec<String>,
    /// Missing entries from the knowledge facet.
    pub knowledge: Vec<String>,
}

impl MissingSkills {
    /// Distinct missing tokens across all three facets.
    pub fn distinct(&self) -> BTreeSet<String> {
        self.technical
            .iter()
            .chain(&self.abilities)
            .chain(&self.knowledge)
            .cloned()
            .collect()
    }
}

/// Gap between a user's competencies and one occupation's requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGap {
    /// Share of the requirement universe already covered, 0..100.
    pub completion_percentage: f64,
    /// Distinct required tokens the user already has.
    pub skills_possessed: usize,
    /// Size of the occupation's requirement universe.
    pub total_required: usize,
    /// Missing tokens grouped by facet.
    pub missing_skills: MissingSkills,
    /// Missing tokens most worth closing first, at most ten.
    pub prioritized_skills: Vec<String>,
}

/// Compute per-occupation skill gaps for a set of recommendations.
///
/// Results are keyed by occupation title in recommendation order. A
/// recommendation whose code is absent from the catalog yields the
/// degenerate gap: nothing required, nothing missing, 100% complete.
pub fn analyze_skill_gaps(
    catalog: &CareerCatalog,
    user_skills: &BTreeSet<String>,
    recommendations: &[Recommendation],
) -> IndexMap<String, SkillGap> {
    let possessed: BTreeSet<String> = user_skills.iter().map(|s| s.to_lowercase()).collect();
    let catalog_requirements: Vec<BTreeSet<String>> = catalog
        .occupations()
        .iter()
        .map(Occupation::required_competencies)
        .collect();

    recommendations
        .iter()
        .map(|recommendation| {
            let gap = occupation_gap(catalog, &catalog_requirements, &possessed, recommendation);
            (recommendation.title.clone(), gap)
        })
        .collect()
}

fn occupation_gap(
    catalog: &CareerCatalog,
    catalog_requirements: &[BTreeSet<String>],
    possessed: &BTreeSet<String>,
    recommendation: &Recommendation,
) -> SkillGap {
    let Some(occupation) = catalog.occupation_by_code(&recommendation.occupation_code) else {
        tracing::debug!(
            code = %recommendation.occupation_code,
            "recommended code missing from catalog, reporting empty gap"
        );
        return SkillGap {
            completion_percentage: 100.0,
            skills_possessed: 0,
            total_required: 0,
            missing_skills: MissingSkills::default(),
            prioritized_skills: Vec::new(),
        };
    };

    let technical = lowercase_set(&occupation.skills);
    let abilities = lowercase_set(&occupation.abilities);
    let knowledge = lowercase_set(&occupation.knowledge);
    let required = occupation.required_competencies();

    let missing: BTreeSet<String> = required.difference(possessed).cloned().collect();
    let total_required = required.len();
    let skills_possessed = total_required - missing.len();
    let completion_percentage = if total_required == 0 {
        100.0
    } else {
        skills_possessed as f64 / total_required as f64 * 100.0
    };

    let missing_skills = MissingSkills {
        technical: facet_members(&missing, &technical),
        abilities: facet_members(&missing, &abilities),
        knowledge: facet_members(&missing, &knowledge),
    };

    SkillGap {
        completion_percentage,
        skills_possessed,
        total_required,
        missing_skills,
        prioritized_skills: prioritize_missing(catalog_requirements, &missing),
    }
}

fn lowercase_set(terms: &[String]) -> BTreeSet<String> {
    terms.iter().map(|term| term.to_lowercase()).collect()
}

fn facet_members(missing: &BTreeSet<String>, facet: &BTreeSet<String>) -> Vec<String> {
    missing
        .iter()
        .filter(|token| facet.contains(*token))
        .cloned()
        .collect()
}

/// Order missing tokens by how many catalog occupations demand them,
/// widest demand first, longer then lexicographically-earlier tokens
/// breaking ties. Truncated to [`PRIORITY_LIMIT`].
fn prioritize_missing(
    catalog_requirements: &[BTreeSet<String>],
    missing: &BTreeSet<String>,
) -> Vec<String> {
    let mut ranked: Vec<(String, usize)> = missing
        .iter()
        .map(|token| {
            let demand = catalog_requirements
                .iter()
                .filter(|requirements| requirements.contains(token))
                .count();
            (token.clone(), demand)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.len().cmp(&a.0.len()))
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(PRIORITY_LIMIT);
    ranked.into_iter().map(|(token, _)| token).collect()
}

/// Broad time bucket for a development plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    /// Under three months.
    ShortTerm,
    /// Three to six months.
    MediumTerm,
    /// Six to twelve months.
    LongTerm,
    /// Over a year.
    Extended,
}

impl TimeFrame {
    fn for_months(total_months: f64) -> Self {
        if total_months < 3.0 {
            Self::ShortTerm
        } else if total_months < 6.0 {
            Self::MediumTerm
        } else if total_months < 12.0 {
            Self::LongTerm
        } else {
            Self::Extended
        }
    }

    /// Display label for the bucket.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortTerm => "Short-term (< 3 months)",
            Self::MediumTerm => "Medium-term (3-6 months)",
            Self::LongTerm => "Long-term (6-12 months)",
            Self::Extended => "Extended (> 12 months)",
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How concentrated the learning effort needs to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Sustainable alongside a job.
    PartTime,
    /// Short focused push.
    Intensive,
}

impl Intensity {
    /// Display label for the intensity.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PartTime => "Part-time",
            Self::Intensive => "Intensive",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Time budget for closing a set of gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimate {
    /// Estimated months of learning, rounded to one decimal.
    pub total_months: f64,
    /// Bucket the estimate falls into.
    pub time_frame: TimeFrame,
    /// Recommended pacing.
    pub intensity: Intensity,
}

/// Kinds of development strategy steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Tackle gaps one at a time.
    Sequencing,
    /// Structured courses and certifications.
    FormalEducation,
    /// Self-paced online learning.
    SelfLearning,
    /// Learning by building.
    PracticalApplication,
    /// Learning from practitioners.
    Networking,
}

impl StrategyKind {
    /// Canonical advice text for the step.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Sequencing => {
                "Focus on developing these skills in sequence rather than simultaneously"
            }
            Self::FormalEducation => "Consider courses or certifications for technical skills",
            Self::SelfLearning => {
                "Leverage online platforms like Coursera, Udemy, or LinkedIn Learning"
            }
            Self::PracticalApplication => "Apply skills in projects to gain practical experience",
            Self::Networking => "Connect with professionals who possess these skills",
        }
    }
}

/// One step of a development strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStep {
    /// What kind of step this is.
    pub kind: StrategyKind,
    /// Advice text for the step.
    pub description: String,
}

impl From<StrategyKind> for StrategyStep {
    fn from(kind: StrategyKind) -> Self {
        Self {
            kind,
            description: kind.description().to_string(),
        }
    }
}

/// A development plan for closing one occupation's gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPlan {
    /// Gaps to close, highest priority first.
    pub skills_to_develop: Vec<String>,
    /// Time budget for the plan.
    pub estimated_time: TimeEstimate,
    /// Ordered strategy steps.
    pub development_strategy: Vec<StrategyStep>,
}

/// Turn per-occupation gaps into development plans, keyed like `gaps`.
pub fn recommend_development_paths(
    gaps: &IndexMap<String, SkillGap>,
    profile: &UserProfile,
) -> IndexMap<String, DevelopmentPlan> {
    gaps.iter()
        .map(|(title, gap)| {
            let plan = DevelopmentPlan {
                skills_to_develop: gap.prioritized_skills.clone(),
                estimated_time: estimate_development_time(&gap.prioritized_skills, profile),
                development_strategy: development_strategy(&gap.prioritized_skills),
            };
            (title.clone(), plan)
        })
        .collect()
}

/// Estimate the months needed to develop `skills`.
///
/// Stronger formal education shortens the per-skill budget through
/// [`UserProfile::education_factor`]. Plans past the six-month mark are
/// paced part-time.
pub fn estimate_development_time(skills: &[String], profile: &UserProfile) -> TimeEstimate {
    let months_per_skill = BASE_MONTHS_PER_SKILL * profile.education_factor();
    let total_months = skills.len() as f64 * months_per_skill;

    TimeEstimate {
        total_months: (total_months * 10.0).round() / 10.0,
        time_frame: TimeFrame::for_months(total_months),
        intensity: if total_months > 6.0 {
            Intensity::PartTime
        } else {
            Intensity::Intensive
        },
    }
}

fn development_strategy(skills: &[String]) -> Vec<StrategyStep> {
    let mut steps = Vec::new();
    if skills.len() > 5 {
        steps.push(StrategyStep::from(StrategyKind::Sequencing));
    }
    steps.push(StrategyStep::from(StrategyKind::FormalEducation));
    steps.push(StrategyStep::from(StrategyKind::SelfLearning));
    steps.push(StrategyStep::from(StrategyKind::PracticalApplication));
    steps.push(StrategyStep::from(StrategyKind::Networking));
    steps
}
