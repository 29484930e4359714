//! Accept/reject thresholds

use crate::scorer::SimilarityScore;
use rowgate_core::{check_unit_interval, GateConfig, Result, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Token-Jaccard threshold as a fraction of the character threshold.
///
/// 0.78 maps to 0.6006, so a paraphrase sharing most of its words is caught
/// even when character edits keep the character ratio under its cutoff.
pub const TOKEN_THRESHOLD_RATIO: f64 = 0.77;

/// The pair of cutoffs a candidate is judged against
///
/// A candidate matches an existing value when either score reaches its
/// threshold. The comparison is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    pub char_threshold: f64,
    pub token_threshold: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            char_threshold: DEFAULT_THRESHOLD,
            token_threshold: DEFAULT_THRESHOLD * TOKEN_THRESHOLD_RATIO,
        }
    }
}

impl ThresholdPolicy {
    /// Policy with the token threshold derived from `char_threshold`
    pub fn new(char_threshold: f64) -> Result<Self> {
        check_unit_interval("threshold", char_threshold)?;
        Ok(Self {
            char_threshold,
            token_threshold: char_threshold * TOKEN_THRESHOLD_RATIO,
        })
    }

    /// Policy with both thresholds given explicitly
    pub fn with_token_threshold(char_threshold: f64, token_threshold: f64) -> Result<Self> {
        check_unit_interval("threshold", char_threshold)?;
        check_unit_interval("token_threshold", token_threshold)?;
        Ok(Self {
            char_threshold,
            token_threshold,
        })
    }

    pub fn from_config(config: &GateConfig) -> Result<Self> {
        match config.token_threshold {
            Some(token) => Self::with_token_threshold(config.threshold, token),
            None => Self::new(config.threshold),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_match(&self, score: &SimilarityScore) -> bool {
        score.char_similarity >= self.char_threshold || score.token_jaccard >= self.token_threshold
    }
}
