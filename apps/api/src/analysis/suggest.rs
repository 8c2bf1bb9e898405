//! Rule-based suggestion builder: turns the score, the keyword gaps, and the
//! failed ATS checks into actionable advice.

use crate::analysis::ats::AtsCheck;

/// Below this the resume needs re-targeting, not polish.
const LOW_SCORE: f32 = 0.45;
/// Below this, phrasing alignment still pays off.
const MODERATE_SCORE: f32 = 0.65;
/// How many missing keywords to surface in one suggestion.
const MAX_LISTED_GAPS: usize = 12;

pub fn build_suggestions(
    match_score: f32,
    missing_keywords: &[String],
    ats_checks: &[AtsCheck],
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if match_score < LOW_SCORE {
        suggestions.push(
            "Customize your summary and top bullets with wording from the job description to raise the match score."
                .to_string(),
        );
    } else if match_score < MODERATE_SCORE {
        suggestions.push(
            "Strengthen skills and achievements using exact phrasing from the job description where truthful."
                .to_string(),
        );
    }

    if !missing_keywords.is_empty() {
        let listed: Vec<&str> = missing_keywords
            .iter()
            .take(MAX_LISTED_GAPS)
            .map(String::as_str)
            .collect();
        suggestions.push(format!(
            "Incorporate missing role-specific keywords where accurate: {}.",
            listed.join(", ")
        ));
    }

    for c in ats_checks.iter().filter(|c| !c.passed) {
        suggestions.push(format!("ATS: {} (improve: {}).", c.message, c.name));
    }

    suggestions.extend([
        "Start bullets with strong action verbs (Built, Optimized, Automated) and quantify impact."
            .to_string(),
        "Keep formatting simple: one column, standard fonts, no headers or footers.".to_string(),
        "Save as a text-based PDF, not a scanned image.".to_string(),
    ]);

    suggestions
}
