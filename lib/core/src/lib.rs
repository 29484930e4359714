//! # rowgate Core
//!
//! Shared types for the rowgate workspace:
//!
//! - [`Row`] - Ordered column -> value mapping supplied by callers
//! - [`GateConfig`] - Thresholds, normalization and file handling options
//! - [`Error`] - The configuration / storage error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use rowgate_core::{GateConfig, Row};
//!
//! let row = Row::from_pairs(["text=You hate animals", "label=toxic"]).unwrap();
//! assert_eq!(row.get("label"), Some("toxic"));
//!
//! let config = GateConfig::default();
//! assert_eq!(config.threshold, 0.78);
//! ```

pub mod config;
pub mod error;
pub mod row;

pub use config::{check_unit_interval, GateConfig, DEFAULT_THRESHOLD, DEFAULT_TIMESTAMP_COLUMN};
pub use error::{Error, ErrorKind, Result};
pub use row::Row;
