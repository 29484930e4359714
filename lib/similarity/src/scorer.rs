//! Two-metric similarity scoring

use crate::distance::{jaccard, sequence_ratio};
use crate::normalize::{tokenize, Normalization};
use ahash::AHashSet;
use serde::Serialize;

/// Character-similarity ratio and token-Jaccard ratio for one comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityScore {
    pub char_similarity: f64,
    pub token_jaccard: f64,
}

/// One existing row judged against a candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityVerdict {
    /// 1-based data row index (header excluded)
    pub row_index: usize,
    /// Literal value stored in the dataset
    pub existing: String,
    pub score: SimilarityScore,
}

/// A value normalized and tokenized once, ready to be compared many times
#[derive(Debug, Clone)]
pub struct PreparedText {
    normalized: String,
    tokens: AHashSet<String>,
}

impl PreparedText {
    #[inline]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Normalized length in characters
    #[inline]
    pub fn char_len(&self) -> usize {
        self.normalized.chars().count()
    }
}

/// Scores pairs of strings. Pure and commutative.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    normalization: Normalization,
}

impl SimilarityScorer {
    pub fn new(normalization: Normalization) -> Self {
        Self { normalization }
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn prepare(&self, text: &str) -> PreparedText {
        let normalized = self.normalization.apply(text);
        let tokens = tokenize(&normalized).collect();
        PreparedText { normalized, tokens }
    }

    pub fn score(&self, a: &str, b: &str) -> SimilarityScore {
        self.score_prepared(&self.prepare(a), &self.prepare(b))
    }

    pub fn score_prepared(&self, a: &PreparedText, b: &PreparedText) -> SimilarityScore {
        SimilarityScore {
            char_similarity: sequence_ratio(&a.normalized, &b.normalized),
            token_jaccard: jaccard(&a.tokens, &b.tokens),
        }
    }
}
