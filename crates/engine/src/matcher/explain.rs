//! Renders recommendation records as markdown explanations.

use super::Recommendation;

/// Skills listed per bullet before truncating.
const SKILL_PREVIEW_LIMIT: usize = 5;

/// Explain why an occupation was recommended, as markdown bullets.
///
/// Skill bullets appear only when the underlying lists are non-empty;
/// education, outlook, and salary lines are always present.
pub fn explain_recommendation(recommendation: &Recommendation) -> String {
    let mut explanation = format!("**{}** was recommended because:\n\n", recommendation.title);

    if !recommendation.matching_skills.is_empty() {
        explanation.push_str(&format!(
            "* You possess {} relevant skills for this role ({}% of required skills)\n",
            recommendation.matching_skills.len(),
            recommendation.skill_match_percentage as u32,
        ));
        explanation.push_str(&format!(
            "* Key matching skills: {}\n\n",
            preview(&recommendation.matching_skills),
        ));
    }

    if !recommendation.missing_skills.is_empty() {
        explanation.push_str(&format!(
            "* To be more competitive, consider developing these skills: {}\n\n",
            preview(&recommendation.missing_skills),
        ));
    }

    explanation.push_str(&format!(
        "* This role typically requires: {}\n",
        recommendation.education_required,
    ));
    explanation.push_str(&format!(
        "* Career outlook: {}\n",
        recommendation.growth_outlook,
    ));
    explanation.push_str(&format!(
        "* Typical salary range: ${} - ${}\n",
        thousands(recommendation.salary_range.min),
        thousands(recommendation.salary_range.max),
    ));

    explanation
}

fn preview(skills: &[String]) -> String {
    skills
        .iter()
        .take(SKILL_PREVIEW_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
