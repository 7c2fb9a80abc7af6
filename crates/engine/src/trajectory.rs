//! Career trajectory projection over the progression graph.
//!
//! Starting from a role, pulls the catalog's progression chains (falling
//! back to fuzzy title matching, then to a synthesized generic ladder),
//! reshapes them around the user's education and leadership profile,
//! assigns each chain a probability that mildly favors shorter ladders,
//! and fills every stage with salary and skill details from the catalog.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use pathwise_catalog::{best_match, CareerCatalog};
use pathwise_profile::{EducationTier, UserProfile};

/// Years projected when the caller does not pick a horizon.
pub const DEFAULT_TIME_HORIZON: usize = 10;
/// Similarity floor for fuzzy progression lookups. Looser than company
/// lookups so near-miss titles still land on real chain data.
pub const ROLE_MATCH_THRESHOLD: f64 = 0.3;
/// Skills listed per projected stage.
const STAGE_SKILL_LIMIT: usize = 5;
/// Probability haircut carried by the longest chains.
const LENGTH_PENALTY: f64 = 0.3;
/// Catch-all occupation code for roles outside the mapping table.
const GENERIC_OCCUPATION_CODE: &str = "13-1071.00";

/// Role titles mapped to occupation codes, checked in order: exact
/// match first, then substring containment in either direction.
const ROLE_CODE_TABLE: &[(&str, &str)] = &[
    ("software developer", "15-1252.00"),
    ("senior software developer", "15-1252.00"),
    ("software engineer", "15-1252.00"),
    ("senior software engineer", "15-1252.00"),
    ("lead software engineer", "15-1252.00"),
    ("software architect", "15-1252.00"),
    ("software development manager", "11-3021.00"),
    ("it manager", "11-3021.00"),
    ("director of engineering", "11-3021.00"),
    ("cto", "11-1021.00"),
    ("data analyst", "15-2051.00"),
    ("data scientist", "15-2051.01"),
    ("senior data scientist", "15-2051.01"),
    ("data science manager", "11-9121.00"),
    ("machine learning engineer", "15-2051.01"),
    ("ai researcher", "15-2051.01"),
    ("marketing specialist", "13-1161.00"),
    ("marketing manager", "11-2021.00"),
    ("digital marketing manager", "11-2021.00"),
    ("marketing director", "11-2021.00"),
    ("cmo", "11-1021.00"),
    ("accountant", "13-2011.00"),
    ("senior accountant", "13-2011.00"),
    ("accounting manager", "11-3031.00"),
    ("financial analyst", "13-2051.00"),
    ("finance manager", "11-3031.00"),
    ("cfo", "11-1021.00"),
];

/// One stage of a projected career path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStage {
    /// Role title at this stage.
    pub title: String,
    /// Median salary for the mapped occupation, 0 when unmapped.
    pub salary: u32,
    /// Leading skills for the mapped occupation, at most five.
    pub skills_required: Vec<String>,
    /// Typical education for the mapped occupation.
    pub education: String,
}

/// One possible path with its probability and a narrative summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPath {
    /// Stage-by-stage detail, one entry per projected year plus the start.
    pub path_details: Vec<RoleStage>,
    /// Likelihood of this path relative to its siblings.
    pub probability: f64,
    /// Narrative summary of the distinct stages.
    pub description: String,
}

/// A fan of projected paths from a starting role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerTrajectory {
    /// Role the projection starts from, as given by the caller.
    pub starting_role: String,
    /// Projected years.
    pub time_horizon: usize,
    /// Candidate paths, most probable first.
    pub paths: Vec<ProjectedPath>,
}

/// Projects career trajectories from catalog progression data.
pub struct TrajectoryProjector<'a> {
    catalog: &'a CareerCatalog,
}

impl<'a> TrajectoryProjector<'a> {
    /// Build a projector over a catalog.
    pub fn new(catalog: &'a CareerCatalog) -> Self {
        Self { catalog }
    }

    /// Project paths from `current_role` over `time_horizon` years.
    ///
    /// Every returned path has exactly `time_horizon + 1` stages, short
    /// chains holding their final role through the remaining years. Path
    /// probabilities sum to one; paths come sorted most probable first,
    /// ties keeping chain order.
    pub fn project(
        &self,
        current_role: &str,
        profile: &UserProfile,
        time_horizon: usize,
    ) -> CareerTrajectory {
        let chains = self.progression_chains(current_role);
        let adjusted = adjust_for_profile(chains, profile);
        let probabilities = path_probabilities(&adjusted);

        let mut paths: Vec<ProjectedPath> = adjusted
            .into_iter()
            .zip(probabilities)
            .map(|(chain, probability)| {
                let mut stages: Vec<String> = chain.into_iter().take(time_horizon + 1).collect();
                let description = describe_path(&stages);
                while stages.len() <= time_horizon {
                    let filler = stages
                        .last()
                        .cloned()
                        .unwrap_or_else(|| current_role.to_string());
                    stages.push(filler);
                }

                ProjectedPath {
                    path_details: stages.iter().map(|role| self.stage_for(role)).collect(),
                    probability,
                    description,
                }
            })
            .collect();

        paths.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });

        CareerTrajectory {
            starting_role: current_role.to_string(),
            time_horizon,
            paths,
        }
    }

    fn progression_chains(&self, current_role: &str) -> Vec<Vec<String>> {
        if let Some(chains) = self.catalog.progressions_for(current_role) {
            return chains.to_vec();
        }

        let keys = self.catalog.career_progressions().keys().map(String::as_str);
        if let Some(matched) = best_match(current_role, keys, ROLE_MATCH_THRESHOLD) {
            if let Some(chains) = self.catalog.progressions_for(&matched) {
                tracing::debug!(query = %current_role, matched = %matched, "fuzzy progression lookup");
                return chains.to_vec();
            }
        }

        tracing::debug!(role = %current_role, "no progression data, synthesizing a generic ladder");
        vec![generic_chain(current_role)]
    }

    fn stage_for(&self, role: &str) -> RoleStage {
        let code = occupation_code_for_role(role);
        match self.catalog.occupation_by_code(code) {
            Some(occupation) => RoleStage {
                title: role.to_string(),
                salary: occupation.salary_range.median,
                skills_required: occupation
                    .skills
                    .iter()
                    .take(STAGE_SKILL_LIMIT)
                    .cloned()
                    .collect(),
                education: occupation.education_required.clone(),
            },
            None => RoleStage {
                title: role.to_string(),
                salary: 0,
                skills_required: Vec::new(),
                education: "Not specified".to_string(),
            },
        }
    }
}

fn adjust_for_profile(chains: Vec<Vec<String>>, profile: &UserProfile) -> Vec<Vec<String>> {
    let anchor = chains.first().and_then(|chain| chain.first()).cloned();

    let mut adjusted: Vec<Vec<String>> = match profile.education_tier() {
        EducationTier::High => chains.into_iter().map(fast_track).collect(),
        EducationTier::Low => chains.into_iter().map(with_intermediate_steps).collect(),
        EducationTier::Medium => chains,
    };

    if profile.has_leadership_skills() {
        if let Some(anchor) = anchor {
            adjusted.push(entrepreneurial_chain(&anchor));
        }
    }

    adjusted
}

/// Keep the first stage, then every second stage after it. Chains of two
/// or fewer stages have nothing to skip.
fn fast_track(chain: Vec<String>) -> Vec<String> {
    if chain.len() <= 2 {
        return chain;
    }
    let mut fast = vec![chain[0].clone()];
    fast.extend(chain.into_iter().skip(2).step_by(2));
    fast
}

/// Insert a "Senior" rung between stages when neither neighbor already
/// carries one.
fn with_intermediate_steps(chain: Vec<String>) -> Vec<String> {
    if chain.len() <= 1 {
        return chain;
    }
    let mut stepped = vec![chain[0].clone()];
    for pair in chain.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if !previous.to_lowercase().contains("senior") && !current.to_lowercase().contains("senior")
        {
            stepped.push(format!("Senior {previous}"));
        }
        stepped.push(current.clone());
    }
    stepped
}

fn generic_chain(role: &str) -> Vec<String> {
    let base = last_word(role);
    vec![
        role.to_string(),
        format!("Senior {role}"),
        format!("{role} Manager"),
        format!("Director of {base}"),
        format!("VP of {base}"),
    ]
}

fn entrepreneurial_chain(starting_role: &str) -> Vec<String> {
    let base = last_word(starting_role);
    vec![
        starting_role.to_string(),
        format!("Senior {starting_role}"),
        format!("Independent {base} Consultant"),
        format!("{base} Practice Lead"),
        format!("Founder, {base} Solutions"),
    ]
}

fn last_word(role: &str) -> &str {
    role.split_whitespace().last().unwrap_or(role)
}

/// Split probability mass across chains, shaving up to [`LENGTH_PENALTY`]
/// off the longest ones, then normalize to sum to one. Lengths are taken
/// before horizon truncation.
fn path_probabilities(chains: &[Vec<String>]) -> Vec<f64> {
    let lengths: Vec<f64> = chains.iter().map(|chain| chain.len() as f64).collect();
    let (Some(min), Some(max)) = (
        lengths.iter().copied().reduce(f64::min),
        lengths.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    let base = 1.0 / lengths.len() as f64;
    let spread = max - min;
    let raw: Vec<f64> = lengths
        .iter()
        .map(|&length| {
            let factor = if spread > 0.0 {
                1.0 - (length - min) / spread * LENGTH_PENALTY
            } else {
                1.0
            };
            base * factor
        })
        .collect();

    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|p| p / total).collect()
}

fn occupation_code_for_role(role: &str) -> &'static str {
    let role_lower = role.to_lowercase();
    for (name, code) in ROLE_CODE_TABLE {
        if *name == role_lower {
            return code;
        }
    }
    for (name, code) in ROLE_CODE_TABLE {
        if role_lower.contains(name) || name.contains(role_lower.as_str()) {
            return code;
        }
    }
    GENERIC_OCCUPATION_CODE
}

/// Summarize the distinct stages of a chain before horizon padding.
fn describe_path(stages: &[String]) -> String {
    match stages {
        [] => "No clear career path identified.".to_string(),
        [only] => format!("Remain in current role as {only}."),
        [start, end] => format!("Direct progression from {start} to {end}."),
        [start, middle, end] => {
            format!("Short progression from {start} through {middle} to {end}.")
        }
        [start, intermediates @ .., end] => {
            let step_text = intermediates.join(", ");
            format!("Career path from {start} through {step_text}, to eventually reach {end}.")
        }
    }
}
