//! Text Normalizer: raw text in, lowercase stop-word-free token sequence out.
//!
//! Keeps `+ # . - ( )` through cleaning so resume-significant tokens like
//! "c++", "c#" and ".net" survive, then trims `. - ( )` off token edges.
//! Tokens shorter than two characters are dropped.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::stopwords::is_stop_word;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9+#.\-()\s]").expect("valid charset regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One side of a scoring operation: the raw text plus its normalized tokens.
/// Created per request, discarded after scoring.
#[derive(Debug, Clone)]
pub struct Document {
    pub raw: String,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn from_raw(text: &str) -> Self {
        Document {
            raw: text.to_string(),
            tokens: tokenize(text),
        }
    }

    /// True when normalization produced no scoreable terms.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token_set(&self) -> HashSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }
}

/// Lowercases, replaces characters outside `a-z0-9+#.-()` with spaces,
/// and collapses runs of whitespace.
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Cleans and splits text into normalized tokens with stop words removed.
/// Empty input yields an empty token sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    clean_text(text)
        .split_whitespace()
        .map(|t| t.trim_matches(|c| matches!(c, '.' | '-' | '(' | ')')))
        .filter(|t| t.len() > 1)
        .filter(|t| t.chars().any(|c| c.is_ascii_alphanumeric()))
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}
