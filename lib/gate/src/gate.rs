//! The duplicate-detection gate
//!
//! Each call re-reads the dataset, scans the check column in file order and
//! either appends the row or reports the first existing row it collides with.
//! Calls against the same path are serialized for the whole scan + append.

use crate::report::{GateOutcome, RejectionReport};
use chrono::{DateTime, SecondsFormat, Utc};
use rowgate_core::{Error, GateConfig, Result, Row};
use rowgate_similarity::{Normalization, SimilarityScorer, SimilarityVerdict, ThresholdPolicy};
use rowgate_storage::{confine, resolve_target, Dataset, PathLocks};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// UTC RFC 3339 with a `Z` suffix and microseconds
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Accepts or rejects rows for CSV datasets
///
/// Cheap to clone; clones share the per-path locks.
#[derive(Debug, Clone)]
pub struct DatasetGate {
    config: GateConfig,
    policy: ThresholdPolicy,
    scorer: SimilarityScorer,
    locks: PathLocks,
}

impl Default for DatasetGate {
    fn default() -> Self {
        Self {
            config: GateConfig::default(),
            policy: ThresholdPolicy::default(),
            scorer: SimilarityScorer::default(),
            locks: PathLocks::new(),
        }
    }
}

impl DatasetGate {
    pub fn new(config: GateConfig) -> Result<Self> {
        config.validate()?;
        let policy = ThresholdPolicy::from_config(&config)?;
        let scorer = SimilarityScorer::new(Normalization::from_flag(config.normalize));
        Ok(Self {
            config,
            policy,
            scorer,
            locks: PathLocks::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Thresholds used by [`DatasetGate::submit`]
    #[inline]
    pub fn policy(&self) -> ThresholdPolicy {
        self.policy
    }

    /// Check `row[check_column]` against the dataset and append on success
    pub fn submit<P: AsRef<Path>>(&self, target: P, check_column: &str, row: &Row) -> Result<GateOutcome> {
        self.submit_with_policy(target, check_column, row, self.policy)
    }

    /// Like [`DatasetGate::submit`] with a per-call character threshold;
    /// the token threshold is derived from it
    pub fn submit_with_threshold<P: AsRef<Path>>(
        &self,
        target: P,
        check_column: &str,
        row: &Row,
        threshold: f64,
    ) -> Result<GateOutcome> {
        self.submit_with_policy(target, check_column, row, ThresholdPolicy::new(threshold)?)
    }

    pub fn submit_with_policy<P: AsRef<Path>>(
        &self,
        target: P,
        check_column: &str,
        row: &Row,
        policy: ThresholdPolicy,
    ) -> Result<GateOutcome> {
        let proposed = self.proposed_value(row, check_column)?;
        let requested = self.requested_path(target.as_ref())?;
        let lock = self.locks.lock_for(&requested);
        let _guard = lock.lock();

        let now = Utc::now();
        let resolved = resolve_target(&requested, self.config.stamp_filename_on_create, now)?;
        let mut dataset = Dataset::open(&resolved)?;

        if let Some(verdict) = self.scan(&dataset, check_column, proposed, &policy) {
            info!(
                "Rejected row for {:?}: similar to row {} (char {:.2}, token {:.2})",
                dataset.path(),
                verdict.row_index,
                verdict.score.char_similarity,
                verdict.score.token_jaccard
            );
            return Ok(GateOutcome::Rejected(RejectionReport::new(verdict, &policy, proposed)));
        }

        let mut stamped = row.clone();
        if stamped
            .insert(self.config.timestamp_column.clone(), iso_timestamp(now))
            .is_some()
        {
            debug!("Overwriting caller-supplied '{}' value", self.config.timestamp_column);
        }

        let receipt = dataset.append(&stamped)?;
        info!("Accepted row {} into {:?}", receipt.row_index, receipt.path);
        Ok(GateOutcome::Accepted(receipt.into()))
    }

    /// Run the duplicate scan without appending
    ///
    /// Returns the report the row would be rejected with, or `None` when
    /// [`DatasetGate::submit`] would accept it right now.
    pub fn check<P: AsRef<Path>>(
        &self,
        target: P,
        check_column: &str,
        row: &Row,
    ) -> Result<Option<RejectionReport>> {
        self.check_with_policy(target, check_column, row, self.policy)
    }

    /// Dry run of [`DatasetGate::submit_with_policy`]
    pub fn check_with_policy<P: AsRef<Path>>(
        &self,
        target: P,
        check_column: &str,
        row: &Row,
        policy: ThresholdPolicy,
    ) -> Result<Option<RejectionReport>> {
        let proposed = self.proposed_value(row, check_column)?;
        let requested = self.requested_path(target.as_ref())?;
        let lock = self.locks.lock_for(&requested);
        let _guard = lock.lock();

        let resolved = resolve_target(&requested, self.config.stamp_filename_on_create, Utc::now())?;
        let dataset = Dataset::open(&resolved)?;

        Ok(self
            .scan(&dataset, check_column, proposed, &policy)
            .map(|verdict| RejectionReport::new(verdict, &policy, proposed)))
    }

    /// The value under check; the timestamp column would be overwritten on
    /// append, so it cannot be the check column
    fn proposed_value<'r>(&self, row: &'r Row, check_column: &str) -> Result<&'r str> {
        if check_column == self.config.timestamp_column {
            return Err(Error::InvalidConfig(format!(
                "check column '{}' is also the timestamp column",
                check_column
            )));
        }
        row.get(check_column)
            .ok_or_else(|| Error::MissingCheckColumn(check_column.to_string()))
    }

    fn requested_path(&self, target: &Path) -> Result<PathBuf> {
        match &self.config.allowed_root {
            Some(root) => confine(target, root),
            None => Ok(target.to_path_buf()),
        }
    }

    /// First existing row, in file order, that the policy matches
    fn scan(
        &self,
        dataset: &Dataset,
        check_column: &str,
        proposed: &str,
        policy: &ThresholdPolicy,
    ) -> Option<SimilarityVerdict> {
        let table = dataset.table()?;
        let Some(values) = table.column_values(check_column) else {
            debug!("Column '{}' not present yet in {:?}; nothing to compare", check_column, dataset.path());
            return None;
        };

        let candidate = self.scorer.prepare(proposed);
        if self.config.min_length > 0 && candidate.char_len() < self.config.min_length {
            debug!(
                "Proposed value is shorter than min_length {}; skipping duplicate scan",
                self.config.min_length
            );
            return None;
        }

        for (i, existing) in values.enumerate() {
            let score = self.scorer.score_prepared(&self.scorer.prepare(existing), &candidate);
            if policy.is_match(&score) {
                return Some(SimilarityVerdict {
                    row_index: i + 1,
                    existing: existing.to_string(),
                    score,
                });
            }
        }
        debug!("Scanned {} rows of {:?}, no match", table.len(), dataset.path());
        None
    }
}
