//! Ranking — joint vectorization, scoring, and ordering of one request.

use tracing::debug;

use crate::matching::models::{MatchItem, MatchResponse, MatchResult, MatchTarget};
use crate::matching::similarity::score_against;
use crate::matching::vectorizer::TextVectorizer;

/// Ranks `items` by similarity to `reference`.
///
/// Algorithm:
/// 1. corpus = [reference, item_1.text, …, item_n.text]
/// 2. One joint `fit_transform` over the corpus; row 0 is the reference.
/// 3. Cosine score per item, clamped to [0, 1] and rounded to `precision`.
/// 4. Stable sort descending by score (ties keep input order).
pub fn rank_items(
    vectorizer: &dyn TextVectorizer,
    target: MatchTarget,
    reference: &str,
    items: &[MatchItem],
    precision: u32,
) -> MatchResponse {
    let corpus: Vec<&str> = std::iter::once(reference)
        .chain(items.iter().map(|item| item.text.as_str()))
        .collect();

    let matrix = vectorizer.fit_transform(&corpus);
    debug!(
        endpoint = target.label(),
        documents = corpus.len(),
        vocabulary = matrix.dimension,
        "Vectorized corpus"
    );

    let scores = match matrix.rows.split_first() {
        Some((reference_vec, item_vecs)) => score_against(reference_vec, item_vecs),
        None => Vec::new(),
    };

    let mut matches: Vec<MatchResult> = items
        .iter()
        .zip(scores)
        .map(|(item, score)| {
            MatchResult::new(target, item.id.clone(), round_score(score, precision))
        })
        .collect();

    matches.sort_by(|a, b| b.score().total_cmp(&a.score()));

    MatchResponse { matches }
}

/// Clamps to [0, 1] and rounds half away from zero to `precision` decimals.
fn round_score(score: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    (score.clamp(0.0, 1.0) * factor).round() / factor
}
