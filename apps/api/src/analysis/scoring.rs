//! Match scoring: a pluggable, trait-based scorer that measures a resume
//! against a job description.
//!
//! Default: `TfidfMatchScorer` (pure-Rust, fast, deterministic, fully
//! testable). `AppState` holds an `Arc<dyn MatchScorer>`, so a different
//! backend can be swapped in at startup without touching handlers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::ats::{run_ats_checks, AtsCheck};
use crate::analysis::normalize::Document;
use crate::analysis::suggest::build_suggestions;
use crate::analysis::tfidf::{cosine_similarity, ranked_terms, weigh_pair};
use crate::errors::AppError;
use crate::extract::SourceFormat;

// ────────────────────────────────────────────────────────────────────────────
// Output data model (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Full scoring output for one resume/job-description pair.
/// Immutable once produced; owned by the caller that requested it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// TF-IDF cosine similarity, 0.0 - 1.0.
    pub match_score: f32,
    /// Top job-description terms by TF-IDF weight, descending.
    pub top_jd_terms: Vec<String>,
    /// Partition of `top_jd_terms` by resume-token membership, rank order kept.
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// matched / extracted, 0.0 when no terms were extracted.
    pub keyword_coverage: f32,
    pub ats_checks: Vec<AtsCheck>,
    pub suggestions: Vec<String>,
    /// "tfidf" — for transparency about which backend produced the score.
    pub scorer_backend: String,
    pub generated_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(
        &self,
        resume: &Document,
        jd: &Document,
        format: SourceFormat,
        top_k: usize,
    ) -> Result<ScoreReport, AppError>;
}

/// TF-IDF cosine-similarity scorer. No external calls, single deterministic pass.
pub struct TfidfMatchScorer;

#[async_trait]
impl MatchScorer for TfidfMatchScorer {
    async fn score(
        &self,
        resume: &Document,
        jd: &Document,
        format: SourceFormat,
        top_k: usize,
    ) -> Result<ScoreReport, AppError> {
        compute_match_report(resume, jd, format, top_k)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core scoring pass
// ────────────────────────────────────────────────────────────────────────────

/// Computes the full report in one pass:
/// 1. TF-IDF weight vectors over the two-document corpus, cosine similarity.
/// 2. Top-k JD terms partitioned into matched/missing by resume-token membership.
/// 3. ATS checklist over the raw resume text.
/// 4. Rule-based suggestions from score, gaps, and failed checks.
///
/// Fails only on insufficient input: either document normalizing to zero tokens.
pub fn compute_match_report(
    resume: &Document,
    jd: &Document,
    format: SourceFormat,
    top_k: usize,
) -> Result<ScoreReport, AppError> {
    if resume.is_empty() {
        return Err(AppError::InsufficientInput(
            "resume contains no scoreable text".to_string(),
        ));
    }
    if jd.is_empty() {
        return Err(AppError::InsufficientInput(
            "job description contains no scoreable text".to_string(),
        ));
    }

    let (resume_weights, jd_weights) = weigh_pair(&resume.tokens, &jd.tokens);
    let match_score = cosine_similarity(&resume_weights, &jd_weights);

    let top_jd_terms = ranked_terms(&jd_weights, top_k);
    let resume_terms = resume.token_set();
    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = top_jd_terms
        .iter()
        .cloned()
        .partition(|term| resume_terms.contains(term.as_str()));

    let keyword_coverage = if top_jd_terms.is_empty() {
        0.0
    } else {
        matched_keywords.len() as f32 / top_jd_terms.len() as f32
    };

    let ats_checks = run_ats_checks(&resume.raw, format);
    let suggestions = build_suggestions(match_score, &missing_keywords, &ats_checks);

    Ok(ScoreReport {
        match_score,
        top_jd_terms,
        matched_keywords,
        missing_keywords,
        keyword_coverage,
        ats_checks,
        suggestions,
        scorer_backend: "tfidf".to_string(),
        generated_at: Utc::now(),
    })
}
