//! Rule-based ATS (Applicant Tracking System) formatting checks.
//!
//! All checks run against the raw resume text, not the normalized tokens:
//! casing, line structure, and punctuation are exactly what ATS parsers
//! trip over.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::SourceFormat;

/// Section headers an ATS expects to find.
const SECTION_HINTS: &[&str] = &[
    "summary",
    "profile",
    "skills",
    "technical skills",
    "experience",
    "work experience",
    "projects",
    "education",
    "certifications",
    "awards",
];

const MIN_SECTIONS: usize = 3;
const MIN_BULLET_LINES: usize = 5;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s\-]{7,}\d").expect("valid phone regex"));
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));
static BULLET_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[•\-\*–]\s+").expect("valid bullet regex"));

/// One named formatting check with its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsCheck {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

fn check(name: &str, passed: bool, message: String) -> AtsCheck {
    AtsCheck {
        name: name.to_string(),
        passed,
        message,
    }
}

pub fn has_contact_info(text: &str) -> (bool, bool) {
    (EMAIL_RE.is_match(text), PHONE_RE.is_match(text))
}

pub fn detect_sections(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    SECTION_HINTS
        .iter()
        .filter(|hint| lowered.contains(*hint))
        .copied()
        .collect()
}

pub fn bullet_line_count(text: &str) -> usize {
    BULLET_LINE_RE.find_iter(text).count()
}

pub fn has_dates(text: &str) -> bool {
    YEAR_RE.is_match(text)
}

/// Runs the fixed checklist against the raw resume text.
pub fn run_ats_checks(resume_text: &str, format: SourceFormat) -> Vec<AtsCheck> {
    let (email_ok, phone_ok) = has_contact_info(resume_text);
    let sections = detect_sections(resume_text);
    let bullets = bullet_line_count(resume_text);

    let format_check = match format {
        SourceFormat::Pdf => check(
            "File Format",
            true,
            "Text-based PDF parses reliably in ATS pipelines.".to_string(),
        ),
        SourceFormat::PlainText => check(
            "File Format",
            false,
            "Plain text parses but loses structure; submit a text-based PDF or DOCX.".to_string(),
        ),
        SourceFormat::RawText => check(
            "File Format",
            true,
            "Raw text submitted; export the final resume as a text-based PDF or DOCX.".to_string(),
        ),
    };

    let contact_message = match (email_ok, phone_ok) {
        (true, true) => "Email and phone number detected.".to_string(),
        (true, false) => "No phone number detected; add a reachable number.".to_string(),
        (false, true) => "No email address detected; add a professional email.".to_string(),
        (false, false) => {
            "No email or phone number detected; include both near the top.".to_string()
        }
    };

    let section_message = if sections.is_empty() {
        "No standard section headers detected.".to_string()
    } else {
        format!("Detected sections: {}.", sections.join(", "))
    };

    vec![
        format_check,
        check("Contact Info", email_ok && phone_ok, contact_message),
        check(
            "Clear Sections",
            sections.len() >= MIN_SECTIONS,
            section_message,
        ),
        check(
            "Bullet Structure",
            bullets >= MIN_BULLET_LINES,
            format!("{bullets} bulleted lines found; use concise bullets with action verbs and impact."),
        ),
        check(
            "Dates Present",
            has_dates(resume_text),
            "Include years for roles and projects (YYYY-YYYY).".to_string(),
        ),
        check(
            "Tables & Graphics",
            true,
            "Use tables and graphics sparingly; some ATS parsers drop their content.".to_string(),
        ),
    ]
}
