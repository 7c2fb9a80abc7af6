//! End-to-end runs of the recommendation pipeline over the embedded catalog.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use pathwise_catalog::{CareerCatalog, Occupation, RiasecScores, SalaryRange};
use pathwise_engine::{
    analyze_skill_gaps, recommend_development_paths, CourseMatcher, MatchStrategy, MatcherConfig,
    OccupationMatcher, TrajectoryProjector,
};
use pathwise_profile::UserProfile;
use pathwise_test_utils::{catalog, data_profile, investigative_personality};

fn position_of(titles: &[String], title: &str) -> usize {
    titles
        .iter()
        .position(|t| t == title)
        .unwrap_or_else(|| panic!("{title} missing from {titles:?}"))
}

#[test]
fn test_investigative_data_profile_outranks_teaching() {
    let catalog = catalog();
    let matcher = OccupationMatcher::new(&catalog);

    let mut profile = data_profile();
    profile.personality = Some(investigative_personality());

    let recommendations = matcher.recommend(&profile, 10);
    let titles: Vec<String> = recommendations.iter().map(|r| r.title.clone()).collect();

    let data_scientist = position_of(&titles, "Data Scientist");
    let software_developer = position_of(&titles, "Software Developer");
    let teacher = position_of(&titles, "Elementary School Teacher");
    assert!(
        data_scientist < teacher && software_developer < teacher,
        "expected data roles above teaching, got {titles:?}"
    );
}

#[test]
fn test_recommend_is_idempotent_per_strategy() {
    let catalog = catalog();
    let profile = data_profile();

    for strategy in [MatchStrategy::Lexical, MatchStrategy::Supervised] {
        let matcher = OccupationMatcher::with_config(
            &catalog,
            MatcherConfig {
                strategy,
                ..MatcherConfig::default()
            },
        );
        let first = matcher.recommend(&profile, 5);
        let second = matcher.recommend(&profile, 5);
        assert_eq!(first, second, "{strategy:?} run must be repeatable");
    }
}

#[test]
fn test_exact_half_skill_coverage() {
    let occupation = Occupation {
        code: "00-0001.00".into(),
        title: "Query Writer".into(),
        description: "Writes queries.".into(),
        skills: vec!["Python".into(), "SQL".into()],
        abilities: Vec::new(),
        knowledge: Vec::new(),
        salary_range: SalaryRange {
            min: 50_000,
            max: 90_000,
            median: 70_000,
        },
        growth_outlook: "Average".into(),
        education_required: "Bachelor's degree".into(),
        riasec: RiasecScores::default(),
    };
    let catalog = CareerCatalog::from_parts(
        vec![occupation],
        Vec::new(),
        IndexMap::new(),
        IndexMap::new(),
        IndexMap::new(),
        Vec::new(),
    );
    let matcher = OccupationMatcher::new(&catalog);
    let profile = UserProfile {
        technical_skills: ["python".to_string()].into_iter().collect(),
        ..UserProfile::default()
    };

    let recommendations = matcher.recommend(&profile, 1);
    let top = &recommendations[0];
    assert_eq!(top.matching_skills, vec!["python".to_string()]);
    assert_eq!(top.missing_skills, vec!["sql".to_string()]);
    assert_eq!(top.skill_match_percentage, 50.0);
}

#[test]
fn test_full_pipeline_flows_between_stages() {
    let catalog = catalog();
    let profile = data_profile();

    let matcher = OccupationMatcher::new(&catalog);
    let recommendations = matcher.recommend(&profile, 3);
    assert_eq!(recommendations.len(), 3);

    let gaps = analyze_skill_gaps(&catalog, &profile.competency_set(), &recommendations);
    let gap_titles: Vec<&String> = gaps.keys().collect();
    let recommendation_titles: Vec<&String> =
        recommendations.iter().map(|r| &r.title).collect();
    assert_eq!(gap_titles, recommendation_titles);

    let paths = recommend_development_paths(&gaps, &profile);
    for (title, plan) in &paths {
        assert_eq!(plan.skills_to_develop, gaps[title].prioritized_skills);
        assert!(plan.estimated_time.total_months >= 0.0);
    }

    let course_matcher = CourseMatcher::new(&catalog);
    let top_gap = &gaps[&recommendations[0].title];
    let courses =
        course_matcher.recommend_courses(&top_gap.prioritized_skills, Some(&profile), 3);
    assert_eq!(courses.len(), top_gap.prioritized_skills.len());
    for (skill, matches) in &courses {
        assert!(matches.len() <= 3, "{skill} returned too many courses");
    }

    let projector = TrajectoryProjector::new(&catalog);
    let trajectory = projector.project(&recommendations[0].title, &profile, 10);
    assert!(!trajectory.paths.is_empty());
    for path in &trajectory.paths {
        assert_eq!(path.path_details.len(), 11);
    }
}

#[test]
fn test_empty_profile_still_flows_without_errors() {
    let catalog = catalog();
    let profile = UserProfile::default();

    let matcher = OccupationMatcher::new(&catalog);
    let recommendations = matcher.recommend(&profile, 5);
    assert_eq!(recommendations.len(), 5, "empty profiles still rank occupations");
    for recommendation in &recommendations {
        assert_eq!(recommendation.match_score, 0.0);
        assert!(recommendation.matching_skills.is_empty());
    }

    let gaps = analyze_skill_gaps(&catalog, &BTreeSet::new(), &recommendations);
    for gap in gaps.values() {
        assert_eq!(gap.skills_possessed, 0);
    }
}
