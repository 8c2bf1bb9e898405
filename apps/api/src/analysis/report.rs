//! Plain-text checklist rendering of a `ScoreReport`, served as a download.

use std::fmt::Write;

use crate::analysis::scoring::ScoreReport;

/// Renders the report as a plain-text checklist. Deterministic for a given
/// report apart from the embedded timestamp.
pub fn render_text_report(report: &ScoreReport) -> String {
    let mut out = String::new();

    // writeln! into a String cannot fail; results are discarded.
    let _ = writeln!(out, "ResumeFit ATS Checklist");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(
        out,
        "Match Score: {}/100",
        (report.match_score * 100.0).round() as u32
    );
    let _ = writeln!(
        out,
        "Keyword Coverage: {} matched / {} extracted",
        report.matched_keywords.len(),
        report.top_jd_terms.len()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Matched Keywords:");
    let _ = writeln!(out, "{}", join_or_none(&report.matched_keywords));
    let _ = writeln!(out);

    let _ = writeln!(out, "Missing Keywords:");
    let _ = writeln!(out, "{}", join_or_none(&report.missing_keywords));
    let _ = writeln!(out);

    let _ = writeln!(out, "ATS Findings:");
    for check in &report.ats_checks {
        let status = if check.passed { "PASS" } else { "WARN" };
        let _ = writeln!(out, "- [{status}] {}: {}", check.name, check.message);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Suggestions:");
    for suggestion in &report.suggestions {
        let _ = writeln!(out, "- {suggestion}");
    }

    out
}

fn join_or_none(terms: &[String]) -> String {
    if terms.is_empty() {
        "(none)".to_string()
    } else {
        terms.join(", ")
    }
}
