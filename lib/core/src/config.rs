//! Gate configuration
//!
//! Every field has a default, so a JSON config file only needs to name what
//! it overrides.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default character-similarity threshold
pub const DEFAULT_THRESHOLD: f64 = 0.78;

/// Default name of the injected timestamp column
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "timestamp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Character-similarity threshold in [0.0, 1.0]
    pub threshold: f64,

    /// Explicit token-Jaccard threshold; derived from `threshold` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_threshold: Option<f64>,

    /// Full normalization (NFKC, placeholders, punctuation) before scoring.
    /// When false only lowercasing and trimming are applied.
    pub normalize: bool,

    /// Minimum normalized length of the proposed value for the scan to run.
    /// 0 disables the check.
    pub min_length: usize,

    /// Column receiving the UTC append time
    pub timestamp_column: String,

    /// Embed a UTC timestamp in the file name when a dataset is created
    pub stamp_filename_on_create: bool,

    /// Confine every target path to this directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_root: Option<PathBuf>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            token_threshold: None,
            normalize: true,
            min_length: 0,
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            stamp_filename_on_create: true,
            allowed_root: None,
        }
    }
}

impl GateConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: GateConfig = serde_json::from_str(&data)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.as_ref().display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("threshold", self.threshold)?;
        if let Some(token) = self.token_threshold {
            check_unit_interval("token_threshold", token)?;
        }
        if self.timestamp_column.trim().is_empty() {
            return Err(Error::InvalidConfig("timestamp_column cannot be empty".into()));
        }
        Ok(())
    }
}

/// Reject NaN and anything outside [0.0, 1.0]
pub fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be within [0.0, 1.0], got {}",
            name, value
        )))
    }
}
