//! Integration tests for the CLI command handlers.
//!
//! Drives each subcommand's handler against the embedded catalog with a
//! profile request written to a temp file, checking both renderings.

use std::io::Write;

use pathwise::cli::OutputFormat;
use pathwise::commands;
use pathwise_engine::{CareerTrajectory, MatchStrategy, Recommendation};
use pathwise_profile::UserProfile;
use pathwise_test_utils::catalog;

const DATA_PROFILE_REQUEST: &str = r#"{
    "skills": {
        "technical": ["python", "sql", "machine learning", "statistics"],
        "soft": ["communication"]
    },
    "personality": {
        "riasec": {
            "Realistic": 40.0,
            "Investigative": 90.0,
            "Artistic": 30.0,
            "Social": 25.0,
            "Enterprising": 35.0,
            "Conventional": 55.0
        },
        "learning_style": "practical"
    }
}"#;

fn write_request(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp profile request");
    file.write_all(json.as_bytes())
        .expect("write temp profile request");
    file
}

fn data_profile() -> UserProfile {
    let file = write_request(DATA_PROFILE_REQUEST);
    commands::load_profile(file.path()).expect("data profile request parses")
}

#[test]
fn test_load_profile_builds_unified_profile() {
    let profile = data_profile();
    assert!(
        profile.technical_skills.contains("python"),
        "confirmed technical skills should reach the profile"
    );
    assert!(
        profile.riasec().is_some(),
        "personality results should reach the profile"
    );
    assert_eq!(profile.learning_style(), Some("practical"));
}

#[test]
fn test_load_profile_rejects_malformed_json() {
    let file = write_request("{ this is not json");
    let error = commands::load_profile(file.path()).expect_err("malformed request should fail");
    let message = format!("{error:#}");
    assert!(
        message.contains("parsing profile request"),
        "error should name the parse step: {message}"
    );
}

#[test]
fn test_load_profile_reports_missing_file() {
    let missing = std::path::Path::new("/nonexistent/profile.json");
    let error = commands::load_profile(missing).expect_err("missing file should fail");
    let message = format!("{error:#}");
    assert!(
        message.contains("reading profile request"),
        "error should name the read step: {message}"
    );
}

#[test]
fn test_recommend_text_lists_ranked_occupations() {
    let catalog = catalog();
    let profile = data_profile();
    let output = commands::recommend(
        &catalog,
        &profile,
        MatchStrategy::Lexical,
        3,
        false,
        OutputFormat::Text,
    )
    .expect("recommend renders");
    assert!(output.starts_with("1. "), "output should be ranked: {output}");
    assert!(
        output.contains("Data Scientist"),
        "a data profile should surface Data Scientist: {output}"
    );
    assert!(output.contains("match "), "scores should be shown");
    assert!(output.contains("salary $"), "salary should be shown");
}

#[test]
fn test_recommend_json_parses_back_into_recommendations() {
    let catalog = catalog();
    let profile = data_profile();
    let output = commands::recommend(
        &catalog,
        &profile,
        MatchStrategy::Lexical,
        3,
        false,
        OutputFormat::Json,
    )
    .expect("recommend renders");
    let parsed: Vec<Recommendation> =
        serde_json::from_str(&output).expect("JSON output should deserialize");
    assert_eq!(parsed.len(), 3);
}

#[test]
fn test_recommend_explain_appends_reasoning() {
    let catalog = catalog();
    let profile = data_profile();
    let output = commands::recommend(
        &catalog,
        &profile,
        MatchStrategy::Lexical,
        2,
        true,
        OutputFormat::Text,
    )
    .expect("recommend renders");
    assert!(
        output.contains("was recommended because"),
        "explanations should be appended: {output}"
    );
}

#[test]
fn test_recommend_supervised_strategy_renders() {
    let catalog = catalog();
    let profile = data_profile();
    let output = commands::recommend(
        &catalog,
        &profile,
        MatchStrategy::Supervised,
        3,
        false,
        OutputFormat::Text,
    )
    .expect("recommend renders");
    assert!(output.starts_with("1. "), "output should be ranked: {output}");
}

#[test]
fn test_gaps_text_reports_completion_and_plan() {
    let catalog = catalog();
    let profile = data_profile();
    let output = commands::gaps(&catalog, &profile, 2, OutputFormat::Text).expect("gaps renders");
    assert!(
        output.contains("% complete"),
        "completion should be shown: {output}"
    );
    assert!(
        output.contains("close first:"),
        "prioritized gaps should be shown: {output}"
    );
    assert!(
        output.contains("months ("),
        "the time estimate should be shown: {output}"
    );
}

#[test]
fn test_courses_defaults_to_top_gap_skills() {
    let catalog = catalog();
    let profile = data_profile();
    let output =
        commands::courses(&catalog, &profile, &[], 2, OutputFormat::Text).expect("courses renders");
    assert!(
        output.contains("Courses for "),
        "default targets should come from the top match's gaps: {output}"
    );
}

#[test]
fn test_courses_honors_explicit_skills() {
    let catalog = catalog();
    let profile = data_profile();
    let skills = vec!["python".to_string()];
    let output = commands::courses(&catalog, &profile, &skills, 2, OutputFormat::Text)
        .expect("courses renders");
    assert!(output.contains("Courses for python:"), "{output}");
    assert!(
        output.contains("Machine Learning A-Z"),
        "python should surface catalog python courses: {output}"
    );
}

#[test]
fn test_trajectory_text_shows_ranked_paths() {
    let catalog = catalog();
    let output = commands::trajectory(
        &catalog,
        "Software Developer",
        &UserProfile::default(),
        10,
        OutputFormat::Text,
    )
    .expect("trajectory renders");
    assert!(output.starts_with("Projected paths for Software Developer over 10 years"));
    assert!(output.contains("% likely:"), "{output}");
    assert!(output.contains("year  0: Software Developer"), "{output}");
}

#[test]
fn test_trajectory_json_pads_every_path_to_horizon() {
    let catalog = catalog();
    let output = commands::trajectory(
        &catalog,
        "Software Developer",
        &UserProfile::default(),
        10,
        OutputFormat::Json,
    )
    .expect("trajectory renders");
    let parsed: CareerTrajectory =
        serde_json::from_str(&output).expect("JSON output should deserialize");
    assert_eq!(parsed.time_horizon, 10);
    for path in &parsed.paths {
        assert_eq!(path.path_details.len(), 11);
    }
}
