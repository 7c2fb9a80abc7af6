//! Course matching against skills worth developing.

use std::cmp::Ordering;

use indexmap::IndexMap;

use pathwise_catalog::{CareerCatalog, Course};
use pathwise_profile::{EducationTier, UserProfile};

use crate::text::TfIdfSpace;

/// Score multiplier when course difficulty fits the education tier.
const DIFFICULTY_BOOST: f64 = 1.2;
/// Score multiplier when course format fits the learning style.
const FORMAT_BOOST: f64 = 1.1;

/// Matches catalog courses to missing skills by text similarity.
pub struct CourseMatcher<'a> {
    catalog: &'a CareerCatalog,
    course_space: TfIdfSpace,
}

impl<'a> CourseMatcher<'a> {
    /// Build a matcher over the catalog's course titles and descriptions.
    pub fn new(catalog: &'a CareerCatalog) -> Self {
        let course_texts: Vec<String> = catalog
            .courses()
            .iter()
            .map(|course| format!("{} {}", course.title, course.description))
            .collect();
        Self {
            catalog,
            course_space: TfIdfSpace::build(&course_texts),
        }
    }

    /// Recommend up to `limit` courses per skill, best match first.
    ///
    /// Underscores in skill names are read as spaces. When a profile is
    /// given, course scores are boosted for matching difficulty
    /// (advanced for highly educated users, beginner for the rest of the
    /// spectrum's low end) and for formats that fit the profile's
    /// learning style. Courses with no textual overlap are dropped, so a
    /// skill the catalog cannot teach maps to an empty list. Ties keep
    /// catalog course order.
    pub fn recommend_courses(
        &self,
        missing_skills: &[String],
        profile: Option<&UserProfile>,
        limit: usize,
    ) -> IndexMap<String, Vec<Course>> {
        missing_skills
            .iter()
            .map(|skill| {
                let query = skill.replace('_', " ");
                let mut scored: Vec<(usize, f64)> = self
                    .course_space
                    .similarities(&query)
                    .into_iter()
                    .enumerate()
                    .collect();

                if let Some(profile) = profile {
                    for (index, score) in &mut scored {
                        *score *= preference_boost(&self.catalog.courses()[*index], profile);
                    }
                }

                scored.retain(|(_, score)| *score > 0.0);
                scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
                scored.truncate(limit);

                if scored.is_empty() {
                    tracing::debug!(skill = %skill, "no courses overlap this skill");
                }
                let courses = scored
                    .into_iter()
                    .map(|(index, _)| self.catalog.courses()[index].clone())
                    .collect();
                (skill.clone(), courses)
            })
            .collect()
    }
}

fn preference_boost(course: &Course, profile: &UserProfile) -> f64 {
    let mut boost = 1.0;

    let tier = profile.education_tier();
    let difficulty = course.difficulty.to_lowercase();
    if (tier == EducationTier::High && difficulty == "advanced")
        || (tier == EducationTier::Low && difficulty == "beginner")
    {
        boost *= DIFFICULTY_BOOST;
    }

    if let Some(style) = profile.learning_style() {
        let format = course.format.to_lowercase();
        let fits = match style {
            "visual" => format.contains("video"),
            "reading" => format.contains("text"),
            "practical" => format.contains("project"),
            _ => false,
        };
        if fits {
            boost *= FORMAT_BOOST;
        }
    }

    boost
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_profile::PersonalityResults;

    fn course(id: u32, title: &str, description: &str, difficulty: &str, format: &str) -> Course {
        Course {
            id,
            title: title.into(),
            provider: "Example".into(),
            url: "https://example.com".into(),
            description: description.into(),
            skills: Vec::new(),
            format: format.into(),
            duration: "10 hours".into(),
            difficulty: difficulty.into(),
            cost: "Free".into(),
        }
    }

    fn catalog_of(courses: Vec<Course>) -> CareerCatalog {
        CareerCatalog::from_parts(
            Vec::new(),
            courses,
            IndexMap::new(),
            IndexMap::new(),
            IndexMap::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_python_surfaces_python_courses() {
        let catalog = CareerCatalog::load().unwrap();
        let matcher = CourseMatcher::new(&catalog);

        let recommended = matcher.recommend_courses(&["python".to_string()], None, 5);
        let courses = &recommended["python"];
        assert!(!courses.is_empty());
        let ids: Vec<u32> = courses.iter().map(|c| c.id).collect();
        assert!(
            ids.contains(&1001),
            "Python for Data Science must rank, got {ids:?}"
        );
        for course in courses {
            let text = format!("{} {}", course.title, course.description).to_lowercase();
            assert!(text.contains("python"), "{} has no overlap", course.title);
        }
    }

    #[test]
    fn test_unteachable_skill_maps_to_empty_list() {
        let catalog = CareerCatalog::load().unwrap();
        let matcher = CourseMatcher::new(&catalog);

        let recommended = matcher.recommend_courses(&["falconry".to_string()], None, 5);
        assert_eq!(recommended["falconry"], Vec::<Course>::new());
    }

    #[test]
    fn test_underscores_read_as_spaces() {
        let catalog = CareerCatalog::load().unwrap();
        let matcher = CourseMatcher::new(&catalog);

        let underscored = matcher.recommend_courses(&["machine_learning".to_string()], None, 3);
        let spaced = matcher.recommend_courses(&["machine learning".to_string()], None, 3);

        let left: Vec<u32> = underscored["machine_learning"].iter().map(|c| c.id).collect();
        let right: Vec<u32> = spaced["machine learning"].iter().map(|c| c.id).collect();
        assert_eq!(left, right);
        assert!(!left.is_empty());
    }

    #[test]
    fn test_limit_caps_results_per_skill() {
        let catalog = CareerCatalog::load().unwrap();
        let matcher = CourseMatcher::new(&catalog);

        let recommended = matcher.recommend_courses(&["machine learning".to_string()], None, 1);
        assert_eq!(recommended["machine learning"].len(), 1);
    }

    #[test]
    fn test_difficulty_boost_reorders_equal_matches() {
        let catalog = catalog_of(vec![
            course(1, "Rust Basics", "Learn rust programming", "beginner", "Text"),
            course(2, "Rust Mastery", "Learn rust programming", "advanced", "Text"),
        ]);
        let matcher = CourseMatcher::new(&catalog);
        let skills = vec!["rust".to_string()];

        let neutral = matcher.recommend_courses(&skills, None, 2);
        assert_eq!(neutral["rust"][0].id, 1, "ties keep catalog order");

        let graduate = UserProfile {
            education: vec!["Master of Science".into()],
            ..UserProfile::default()
        };
        let boosted = matcher.recommend_courses(&skills, Some(&graduate), 2);
        assert_eq!(boosted["rust"][0].id, 2, "advanced course boosted for High tier");

        let novice = UserProfile {
            education: vec!["High school diploma".into()],
            ..UserProfile::default()
        };
        let boosted = matcher.recommend_courses(&skills, Some(&novice), 2);
        assert_eq!(boosted["rust"][0].id, 1, "beginner course boosted for Low tier");
    }

    #[test]
    fn test_format_boost_matches_learning_style() {
        let catalog = catalog_of(vec![
            course(1, "Guide", "kubernetes deployments", "intermediate", "Text-based"),
            course(2, "Screencasts", "kubernetes deployments", "intermediate", "Video lectures"),
        ]);
        let matcher = CourseMatcher::new(&catalog);

        let visual = UserProfile {
            personality: Some(PersonalityResults {
                learning_style: "visual".into(),
                ..Default::default()
            }),
            ..UserProfile::default()
        };
        let recommended = matcher.recommend_courses(&["kubernetes".to_string()], Some(&visual), 2);
        assert_eq!(recommended["kubernetes"][0].id, 2);
    }

    #[test]
    fn test_results_keyed_in_input_order() {
        let catalog = CareerCatalog::load().unwrap();
        let matcher = CourseMatcher::new(&catalog);
        let skills = vec![
            "project management".to_string(),
            "python".to_string(),
            "leadership".to_string(),
        ];

        let recommended = matcher.recommend_courses(&skills, None, 2);
        let keys: Vec<&String> = recommended.keys().collect();
        assert_eq!(keys, skills.iter().collect::<Vec<_>>());
    }
}
