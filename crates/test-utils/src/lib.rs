//! Shared test fixtures for pathwise crates.
//!
//! This crate provides the profiles and catalog loads used across
//! multiple crates in the pathwise workspace.

use std::collections::BTreeSet;

use pathwise_catalog::{CareerCatalog, RiasecScores};
use pathwise_profile::{PersonalityResults, UserProfile};

/// Load the embedded career catalog.
///
/// Panics when the embedded fixtures fail to parse, which would mean the
/// build itself is broken.
pub fn catalog() -> CareerCatalog {
    CareerCatalog::load().expect("embedded catalog fixtures parse")
}

/// A data-leaning profile: Python, SQL, machine learning, statistics.
pub fn data_profile() -> UserProfile {
    UserProfile {
        technical_skills: skill_set(&["python", "sql", "machine learning", "statistics"]),
        soft_skills: skill_set(&["communication"]),
        ..UserProfile::default()
    }
}

/// The data profile with one education entry attached.
pub fn profile_with_education(education: &str) -> UserProfile {
    UserProfile {
        education: vec![education.to_string()],
        ..data_profile()
    }
}

/// The data profile with leadership-flavored soft skills.
pub fn leadership_profile() -> UserProfile {
    UserProfile {
        soft_skills: skill_set(&["communication", "team leadership", "project management"]),
        ..data_profile()
    }
}

/// Assessment results with a strongly Investigative RIASEC slant.
pub fn investigative_personality() -> PersonalityResults {
    PersonalityResults {
        riasec: Some(RiasecScores {
            realistic: 40.0,
            investigative: 90.0,
            artistic: 30.0,
            social: 25.0,
            enterprising: 35.0,
            conventional: 55.0,
        }),
        learning_style: "practical".to_string(),
        ..PersonalityResults::default()
    }
}

fn skill_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
