//! Outcomes returned to the caller
//!
//! The text form of [`RejectionReport`] is read by the generating agent, so
//! its labels and line order must not change.

use rowgate_similarity::{SimilarityVerdict, ThresholdPolicy};
use rowgate_storage::AppendReceipt;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub const CORRECTIVE_INSTRUCTION: &str = "Generate a significantly different example.";

/// Why a proposed row was refused
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionReport {
    /// 1-based index of the matching existing row (header excluded)
    pub row_index: usize,
    pub char_similarity: f64,
    pub token_jaccard: f64,
    pub char_threshold: f64,
    pub token_threshold: f64,
    pub existing: String,
    pub proposed: String,
    pub instruction: String,
}

impl RejectionReport {
    pub fn new(verdict: SimilarityVerdict, policy: &ThresholdPolicy, proposed: &str) -> Self {
        Self {
            row_index: verdict.row_index,
            char_similarity: verdict.score.char_similarity,
            token_jaccard: verdict.score.token_jaccard,
            char_threshold: policy.char_threshold,
            token_threshold: policy.token_threshold,
            existing: verdict.existing,
            proposed: proposed.to_string(),
            instruction: CORRECTIVE_INSTRUCTION.to_string(),
        }
    }
}

impl fmt::Display for RejectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VALIDATION FAILED: Similar to existing row")?;
        writeln!(f, "Row: {}", self.row_index)?;
        writeln!(
            f,
            "Char-sim: {:.2} (threshold {:.2})",
            self.char_similarity, self.char_threshold
        )?;
        writeln!(
            f,
            "Token-Jaccard: {:.2} (threshold {:.2})",
            self.token_jaccard, self.token_threshold
        )?;
        writeln!(f, "Existing: {}", self.existing)?;
        writeln!(f, "Proposed: {}", self.proposed)?;
        write!(f, "Instruction: {}", self.instruction)
    }
}

/// Where an accepted row landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendOutcome {
    /// Resolved dataset path; pass it back to continue the same dataset
    pub path: PathBuf,
    /// 1-based index of the new row, equal to the data row count
    pub row_index: usize,
    pub created: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added_columns: Vec<String>,
}

impl From<AppendReceipt> for AppendOutcome {
    fn from(receipt: AppendReceipt) -> Self {
        Self {
            path: receipt.path,
            row_index: receipt.row_index,
            created: receipt.created,
            added_columns: receipt.added_columns,
        }
    }
}

impl fmt::Display for AppendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.created {
            write!(f, "Created {} and appended first row.", self.path.display())
        } else if self.added_columns.is_empty() {
            write!(f, "Appended row {} to {}.", self.row_index, self.path.display())
        } else {
            write!(
                f,
                "Appended row {} to {} (added new columns: {}).",
                self.row_index,
                self.path.display(),
                self.added_columns.join(", ")
            )
        }
    }
}

/// Result of a gate call that did not fail
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GateOutcome {
    Accepted(AppendOutcome),
    Rejected(RejectionReport),
}

impl GateOutcome {
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateOutcome::Accepted(_))
    }

    #[inline]
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, GateOutcome::Rejected(_))
    }

    pub fn accepted(&self) -> Option<&AppendOutcome> {
        match self {
            GateOutcome::Accepted(outcome) => Some(outcome),
            GateOutcome::Rejected(_) => None,
        }
    }

    pub fn rejected(&self) -> Option<&RejectionReport> {
        match self {
            GateOutcome::Rejected(report) => Some(report),
            GateOutcome::Accepted(_) => None,
        }
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOutcome::Accepted(outcome) => outcome.fmt(f),
            GateOutcome::Rejected(report) => report.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowgate_similarity::SimilarityScore;

    fn report() -> RejectionReport {
        let verdict = SimilarityVerdict {
            row_index: 1,
            existing: "You hate animals".to_string(),
            score: SimilarityScore { char_similarity: 32.0 / 37.0, token_jaccard: 0.75 },
        };
        RejectionReport::new(verdict, &ThresholdPolicy::default(), "You just hate animals")
    }

    #[test]
    fn test_report_text_layout() {
        assert_eq!(
            report().to_string(),
            "VALIDATION FAILED: Similar to existing row\n\
             Row: 1\n\
             Char-sim: 0.86 (threshold 0.78)\n\
             Token-Jaccard: 0.75 (threshold 0.60)\n\
             Existing: You hate animals\n\
             Proposed: You just hate animals\n\
             Instruction: Generate a significantly different example."
        );
    }

    #[test]
    fn test_outcome_json() {
        let json = serde_json::to_value(GateOutcome::Rejected(report())).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["row_index"], 1);
        assert_eq!(json["existing"], "You hate animals");

        let accepted = GateOutcome::Accepted(AppendOutcome {
            path: PathBuf::from("data.csv"),
            row_index: 2,
            created: false,
            added_columns: vec![],
        });
        let json = serde_json::to_value(&accepted).unwrap();
        assert_eq!(json["status"], "accepted");
        assert_eq!(json["path"], "data.csv");
        assert!(json.get("added_columns").is_none());
    }

    #[test]
    fn test_append_messages() {
        let mut outcome = AppendOutcome {
            path: PathBuf::from("data.csv"),
            row_index: 3,
            created: false,
            added_columns: vec![],
        };
        assert_eq!(outcome.to_string(), "Appended row 3 to data.csv.");

        outcome.added_columns = vec!["model".into(), "score".into()];
        assert_eq!(
            outcome.to_string(),
            "Appended row 3 to data.csv (added new columns: model, score)."
        );

        outcome.created = true;
        assert_eq!(outcome.to_string(), "Created data.csv and appended first row.");
    }
}
