//! # rowgate
//!
//! A near-duplicate gate for CSV datasets.
//!
//! rowgate guards writes into a tabular dataset: a new row is appended only
//! if its designated text column is not too similar to any row already
//! accepted. Upstream generators (people or agents) that hit the gate get a
//! structured report telling them which row they collided with and how close
//! they were, so they can produce something genuinely new.
//!
//! ## Quick Start
//!
//! ### As a Command
//!
//! ```bash
//! rowgate --file data.csv --check-col text text="You hate animals" label=toxic
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use rowgate::prelude::*;
//!
//! let gate = DatasetGate::new(GateConfig::default()).unwrap();
//! let row = Row::from_pairs(["text=You just hate animals"]).unwrap();
//!
//! match gate.submit("data.csv", "text", &row).unwrap() {
//!     GateOutcome::Accepted(outcome) => println!("{}", outcome),
//!     GateOutcome::Rejected(report) => println!("{}", report),
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `rowgate-core` - Rows, configuration and the error taxonomy
//! - `rowgate-similarity` - Character ratio, token Jaccard and the threshold policy
//! - `rowgate-storage` - CSV tables, schema migration, atomic writes, path locks
//! - `rowgate-gate` - The scan / decide / append protocol
//!
//! ## Scoring
//!
//! - **Character similarity**: matching-blocks ratio over normalized text
//! - **Token Jaccard**: overlap of unique words
//! - A row is rejected when either score reaches its threshold (0.78 and
//!   0.78 x 0.77 by default)

// Re-export core types
pub use rowgate_core::{Error, ErrorKind, GateConfig, Result, Row};

// Re-export similarity
pub use rowgate_similarity::{
    Normalization, SimilarityScore, SimilarityScorer, SimilarityVerdict, ThresholdPolicy,
};

// Re-export storage
pub use rowgate_storage::{Dataset, PathLocks, Table};

// Re-export the gate
pub use rowgate_gate::{AppendOutcome, DatasetGate, GateOutcome, RejectionReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AppendOutcome, DatasetGate, Error, ErrorKind, GateConfig, GateOutcome, RejectionReport,
        Result, Row, SimilarityScorer, ThresholdPolicy,
    };
}
