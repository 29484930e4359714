//! # rowgate Similarity
//!
//! Duplicate scoring for the rowgate dataset gate.
//!
//! Two independent metrics are computed over normalized text:
//!
//! - **Character similarity**: matching-blocks ratio over the characters
//! - **Token Jaccard**: overlap of the unique word sets
//!
//! A [`ThresholdPolicy`] turns the pair into an accept/reject decision: a
//! candidate matches when either metric reaches its threshold.
//!
//! ## Example
//!
//! ```rust
//! use rowgate_similarity::{SimilarityScorer, ThresholdPolicy};
//!
//! let scorer = SimilarityScorer::default();
//! let score = scorer.score("You hate animals", "You just hate animals");
//!
//! let policy = ThresholdPolicy::new(0.78).unwrap();
//! assert!(policy.is_match(&score));
//! ```

pub mod distance;
pub mod normalize;
pub mod policy;
pub mod scorer;

pub use distance::{jaccard, sequence_ratio};
pub use normalize::{tokenize, Normalization};
pub use policy::{ThresholdPolicy, TOKEN_THRESHOLD_RATIO};
pub use scorer::{PreparedText, SimilarityScore, SimilarityScorer, SimilarityVerdict};
