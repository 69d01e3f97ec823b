//! Text Vectorizer — turns a corpus into TF-IDF weighted sparse vectors.
//!
//! The vectorizer is fit fresh on every call: vocabulary and idf weights are
//! derived from exactly the texts passed in, so vectors are only comparable
//! within one `fit_transform` result.
//!
//! `AppState` holds an `Arc<dyn TextVectorizer>`, so a different weighting
//! scheme can be dropped in without touching the handlers.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use regex::Regex;

/// Two or more word characters between word boundaries. Single-letter tokens
/// never enter the vocabulary.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

// ────────────────────────────────────────────────────────────────────────────
// Sparse vectors
// ────────────────────────────────────────────────────────────────────────────

/// Sparse vector stored as `(term_index, weight)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector from pairs; they are sorted by index and zero weights dropped.
    pub fn from_pairs(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product via a merge walk over both sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
        self
    }
}

/// Document-term matrix produced by one joint vectorization pass.
#[derive(Debug, Clone, Default)]
pub struct TermMatrix {
    /// One row per input document, in input order.
    pub rows: Vec<SparseVector>,
    /// Vocabulary size (number of columns). Zero when no terms were found.
    pub dimension: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Converts a corpus into one vector per document.
///
/// Implementations must return exactly `corpus.len()` rows and must not fail
/// on empty or term-less documents; those become zero vectors.
pub trait TextVectorizer: Send + Sync {
    fn fit_transform(&self, corpus: &[&str]) -> TermMatrix;
}

// ────────────────────────────────────────────────────────────────────────────
// TfidfVectorizer — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Smoothed TF-IDF with L2-normalised rows.
///
/// Algorithm:
/// 1. Lowercase each document and extract tokens matching `\b\w\w+\b`.
/// 2. Vocabulary = all distinct tokens, indexed in lexicographic order.
/// 3. weight(t, d) = count(t, d) × (ln((1 + n) / (1 + df(t))) + 1)
/// 4. Normalise each row to unit length (zero rows stay zero).
pub struct TfidfVectorizer {
    token_re: Regex,
}

impl TfidfVectorizer {
    pub fn new() -> Result<Self> {
        let token_re = Regex::new(TOKEN_PATTERN).context("invalid token pattern")?;
        Ok(Self { token_re })
    }

    fn term_counts(&self, document: &str) -> HashMap<String, u32> {
        let lowered = document.to_lowercase();
        let mut counts = HashMap::new();
        for token in self.token_re.find_iter(&lowered) {
            *counts.entry(token.as_str().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn fit_transform(&self, corpus: &[&str]) -> TermMatrix {
        let counts: Vec<HashMap<String, u32>> =
            corpus.iter().map(|doc| self.term_counts(doc)).collect();

        // BTreeMap keeps the vocabulary sorted, which fixes column order.
        let mut doc_freq: BTreeMap<&str, u32> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n_docs = corpus.len() as f64;
        let mut vocabulary: HashMap<&str, (usize, f64)> = HashMap::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.iter().enumerate() {
            let idf = ((1.0 + n_docs) / (1.0 + f64::from(*df))).ln() + 1.0;
            vocabulary.insert(*term, (idx, idf));
        }

        let rows = counts
            .iter()
            .map(|doc| {
                let pairs = doc
                    .iter()
                    .filter_map(|(term, &tf)| {
                        vocabulary
                            .get(term.as_str())
                            .map(|&(idx, idf)| (idx, f64::from(tf) * idf))
                    })
                    .collect();
                SparseVector::from_pairs(pairs).normalized()
            })
            .collect();

        TermMatrix {
            rows,
            dimension: doc_freq.len(),
        }
    }
}
