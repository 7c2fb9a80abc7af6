//! Command handlers for the `pathwise` CLI.
//!
//! Each handler runs the engine end to end for one subcommand and
//! returns the rendered output, so tests can assert on results without
//! spawning the binary.

use crate::cli::OutputFormat;
use anyhow::Context;
use indexmap::IndexMap;
use pathwise_catalog::{CareerCatalog, Course};
use pathwise_engine::{
    analyze_skill_gaps, explain_recommendation, recommend_development_paths, CareerTrajectory,
    CourseMatcher, DevelopmentPlan, MatchStrategy, MatcherConfig, OccupationMatcher,
    Recommendation, SkillGap, TrajectoryProjector,
};
use pathwise_profile::{ProfileRequest, UserProfile};
use serde::Serialize;
use std::path::Path;

/// Characters of a course description kept in text output.
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Load a profile request file and build the unified profile.
pub fn load_profile(path: &Path) -> anyhow::Result<UserProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading profile request {}", path.display()))?;
    let request: ProfileRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing profile request {}", path.display()))?;
    tracing::debug!(path = %path.display(), "profile request loaded");
    Ok(request.into_profile())
}

/// Rank occupations for a profile and render them.
pub fn recommend(
    catalog: &CareerCatalog,
    profile: &UserProfile,
    strategy: MatchStrategy,
    limit: usize,
    explain: bool,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let config = MatcherConfig {
        strategy,
        ..MatcherConfig::default()
    };
    let matcher = OccupationMatcher::with_config(catalog, config);
    let recommendations = matcher.recommend(profile, limit);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&recommendations)?),
        OutputFormat::Text => Ok(render_recommendations(&recommendations, explain)),
    }
}

/// Combined gap-analysis payload for JSON output.
#[derive(Debug, Serialize)]
pub struct GapReport {
    /// Per-occupation skill gaps, keyed by title.
    pub gaps: IndexMap<String, SkillGap>,
    /// Per-occupation development plans, keyed by title.
    pub development_paths: IndexMap<String, DevelopmentPlan>,
}

/// Analyze gaps against the top matches and render plans to close them.
pub fn gaps(
    catalog: &CareerCatalog,
    profile: &UserProfile,
    limit: usize,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let matcher = OccupationMatcher::new(catalog);
    let recommendations = matcher.recommend(profile, limit);
    let gaps = analyze_skill_gaps(catalog, &profile.competency_set(), &recommendations);
    let development_paths = recommend_development_paths(&gaps, profile);
    let report = GapReport {
        gaps,
        development_paths,
    };
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => Ok(render_gap_report(&report)),
    }
}

/// Recommend courses per missing skill and render them.
///
/// When `skills` is empty the targets default to the prioritized gaps of
/// the profile's strongest occupation match.
pub fn courses(
    catalog: &CareerCatalog,
    profile: &UserProfile,
    skills: &[String],
    limit: usize,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let targets = if skills.is_empty() {
        top_gap_skills(catalog, profile)
    } else {
        skills.to_vec()
    };
    let matcher = CourseMatcher::new(catalog);
    let recommendations = matcher.recommend_courses(&targets, Some(profile), limit);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&recommendations)?),
        OutputFormat::Text => Ok(render_courses(&recommendations)),
    }
}

/// Project career paths from a starting role and render them.
pub fn trajectory(
    catalog: &CareerCatalog,
    role: &str,
    profile: &UserProfile,
    horizon: usize,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let projector = TrajectoryProjector::new(catalog);
    let trajectory = projector.project(role, profile, horizon);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&trajectory)?),
        OutputFormat::Text => Ok(render_trajectory(&trajectory)),
    }
}

fn top_gap_skills(catalog: &CareerCatalog, profile: &UserProfile) -> Vec<String> {
    let matcher = OccupationMatcher::new(catalog);
    let recommendations = matcher.recommend(profile, 1);
    let gaps = analyze_skill_gaps(catalog, &profile.competency_set(), &recommendations);
    gaps.into_iter()
        .next()
        .map(|(_, gap)| gap.prioritized_skills)
        .unwrap_or_default()
}

fn render_recommendations(recommendations: &[Recommendation], explain: bool) -> String {
    if recommendations.is_empty() {
        return "No occupations matched this profile.\n".to_string();
    }
    let mut out = String::new();
    for (rank, recommendation) in recommendations.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} [{}]\n",
            rank + 1,
            recommendation.title,
            recommendation.occupation_code
        ));
        out.push_str(&format!(
            "   match {:.1} | skills covered {:.1}% | outlook: {}\n",
            recommendation.match_score,
            recommendation.skill_match_percentage,
            recommendation.growth_outlook
        ));
        out.push_str(&format!(
            "   salary ${} - ${} | education: {}\n",
            recommendation.salary_range.min,
            recommendation.salary_range.max,
            recommendation.education_required
        ));
        if !recommendation.top_companies.is_empty() {
            let names: Vec<&str> = recommendation
                .top_companies
                .iter()
                .map(|company| company.name.as_str())
                .collect();
            out.push_str(&format!("   hiring: {}\n", names.join(", ")));
        }
        if explain {
            out.push('\n');
            out.push_str(&explain_recommendation(recommendation));
        }
        out.push('\n');
    }
    out
}

fn render_gap_report(report: &GapReport) -> String {
    if report.gaps.is_empty() {
        return "No occupations matched this profile.\n".to_string();
    }
    let mut out = String::new();
    for (title, gap) in &report.gaps {
        out.push_str(&format!(
            "{}: {:.1}% complete ({} of {} requirements)\n",
            title, gap.completion_percentage, gap.skills_possessed, gap.total_required
        ));
        if !gap.prioritized_skills.is_empty() {
            out.push_str(&format!(
                "   close first: {}\n",
                gap.prioritized_skills.join(", ")
            ));
        }
        if let Some(plan) = report.development_paths.get(title) {
            out.push_str(&format!(
                "   plan: {:.1} months ({}, {})\n",
                plan.estimated_time.total_months,
                plan.estimated_time.time_frame.label(),
                plan.estimated_time.intensity.label()
            ));
            for step in &plan.development_strategy {
                out.push_str(&format!("   - {}\n", step.description));
            }
        }
        out.push('\n');
    }
    out
}

fn render_courses(recommendations: &IndexMap<String, Vec<Course>>) -> String {
    if recommendations.is_empty() {
        return "No skill gaps to close.\n".to_string();
    }
    let mut out = String::new();
    for (skill, courses) in recommendations {
        out.push_str(&format!("Courses for {skill}:\n"));
        if courses.is_empty() {
            out.push_str("   (no catalog course covers this skill)\n");
        }
        for course in courses {
            out.push_str(&format!(
                "   {} | {} | {} | {} | {}\n",
                course.title, course.provider, course.difficulty, course.duration, course.cost
            ));
            out.push_str(&format!("      {}\n", preview(&course.description)));
        }
        out.push('\n');
    }
    out
}

fn render_trajectory(trajectory: &CareerTrajectory) -> String {
    let mut out = format!(
        "Projected paths for {} over {} years:\n\n",
        trajectory.starting_role, trajectory.time_horizon
    );
    for (rank, path) in trajectory.paths.iter().enumerate() {
        out.push_str(&format!(
            "{}. {:.0}% likely: {}\n",
            rank + 1,
            path.probability * 100.0,
            path.description
        ));
        // Padded years repeat the final role; print each title once.
        let mut previous: Option<&str> = None;
        for (year, stage) in path.path_details.iter().enumerate() {
            if previous == Some(stage.title.as_str()) {
                continue;
            }
            previous = Some(stage.title.as_str());
            if stage.salary > 0 {
                out.push_str(&format!(
                    "   year {:>2}: {} (${})\n",
                    year, stage.title, stage.salary
                ));
            } else {
                out.push_str(&format!("   year {:>2}: {}\n", year, stage.title));
            }
        }
        out.push('\n');
    }
    out
}

/// First characters of a description, with an ellipsis when truncated.
fn preview(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_keeps_short_descriptions_whole() {
        assert_eq!(preview("learn python"), "learn python");
    }

    #[test]
    fn test_preview_truncates_long_descriptions_at_char_boundary() {
        let long = "x".repeat(250);
        let shown = preview(&long);
        assert_eq!(
            shown.len(),
            DESCRIPTION_PREVIEW_CHARS + 3,
            "preview should cut at the limit and add an ellipsis"
        );
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let long = "é".repeat(120);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_render_recommendations_empty_has_fallback_line() {
        let rendered = render_recommendations(&[], false);
        assert_eq!(rendered, "No occupations matched this profile.\n");
    }
}
