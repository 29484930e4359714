//! # rowgate Gate
//!
//! The accept/reject point guarding writes into a CSV dataset.
//!
//! A call to [`DatasetGate::submit`] re-reads the dataset, compares the
//! proposed row's check column against every existing value and either
//! appends the row (timestamped, with any new columns migrated in) or returns
//! a [`RejectionReport`] naming the first existing row it is too close to.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rowgate_core::{GateConfig, Row};
//! use rowgate_gate::{DatasetGate, GateOutcome};
//!
//! let gate = DatasetGate::new(GateConfig::default()).unwrap();
//! let row = Row::from_pairs(["text=You hate animals", "label=toxic"]).unwrap();
//!
//! match gate.submit("dataset.csv", "text", &row).unwrap() {
//!     GateOutcome::Accepted(outcome) => println!("{}", outcome),
//!     GateOutcome::Rejected(report) => println!("{}", report),
//! }
//! ```

pub mod gate;
pub mod report;

pub use gate::{iso_timestamp, DatasetGate};
pub use report::{AppendOutcome, GateOutcome, RejectionReport, CORRECTIVE_INSTRUCTION};
