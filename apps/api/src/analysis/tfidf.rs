//! TF-IDF weighting and cosine similarity over a two-document corpus.
//!
//! IDF is smoothed: `ln((1 + n) / (1 + df)) + 1` with `n = 2`. Terms shared
//! by both documents keep weight 1.0, so identical documents score exactly
//! 1.0 instead of degenerating to a zero vector.

use std::collections::HashMap;

/// Raw term counts for one token sequence.
pub fn term_frequencies(tokens: &[String]) -> HashMap<String, f32> {
    let mut tf: HashMap<String, f32> = HashMap::with_capacity(tokens.len());
    for token in tokens {
        *tf.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    tf
}

/// TF-IDF weight vectors for a resume/job-description pair, over the union
/// vocabulary of the two documents.
pub fn weigh_pair(
    resume_tokens: &[String],
    jd_tokens: &[String],
) -> (HashMap<String, f32>, HashMap<String, f32>) {
    let resume_tf = term_frequencies(resume_tokens);
    let jd_tf = term_frequencies(jd_tokens);

    let n_docs = 2.0_f32;
    let idf = |term: &str| {
        let df = resume_tf.contains_key(term) as u32 + jd_tf.contains_key(term) as u32;
        ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0
    };

    let weigh = |tf: &HashMap<String, f32>| {
        tf.iter()
            .map(|(term, count)| (term.clone(), count * idf(term)))
            .collect::<HashMap<String, f32>>()
    };

    (weigh(&resume_tf), weigh(&jd_tf))
}

/// Cosine of the angle between two sparse weight vectors.
/// Returns 0.0 when either vector has no magnitude (disjoint or empty input).
pub fn cosine_similarity(a: &HashMap<String, f32>, b: &HashMap<String, f32>) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let dot: f32 = small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum();

    let norm = |v: &HashMap<String, f32>| v.values().map(|w| w * w).sum::<f32>().sqrt();
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    (dot / denom).clamp(0.0, 1.0)
}

/// Terms ranked by descending weight, ties broken alphabetically, capped at `k`.
pub fn ranked_terms(weights: &HashMap<String, f32>, k: usize) -> Vec<String> {
    let mut ranked: Vec<(&String, f32)> = weights.iter().map(|(t, w)| (t, *w)).collect();
    ranked.sort_by(|(ta, wa), (tb, wb)| {
        wb.partial_cmp(wa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| ta.cmp(tb))
    });
    ranked.into_iter().take(k).map(|(t, _)| t.clone()).collect()
}
