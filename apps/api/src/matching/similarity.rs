//! Similarity Scorer — cosine similarity between a reference vector and candidates.

use crate::matching::vectorizer::SparseVector;

/// cos(a, b) = a·b / (‖a‖ · ‖b‖), or 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// Scores every candidate against `reference`, preserving candidate order.
pub fn score_against(reference: &SparseVector, candidates: &[SparseVector]) -> Vec<f64> {
    candidates
        .iter()
        .map(|candidate| cosine_similarity(reference, candidate))
        .collect()
}
