use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of a failed gate call.
///
/// A rejection is not an error at all; it is returned as a normal outcome.
/// Configuration errors mean the caller asked for something malformed,
/// storage errors mean the environment is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Storage,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Proposed data is missing the check column '{0}'")]
    MissingCheckColumn(String),

    #[error("Invalid pair (expected key=value): {0}")]
    InvalidPair(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Row shape mismatch: {0}")]
    RowShape(String),

    #[error("Path {path:?} is outside the allowed root {root:?}")]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Malformed dataset {path:?}: {reason}")]
    MalformedDataset { path: PathBuf, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingCheckColumn(_)
            | Error::InvalidPair(_)
            | Error::InvalidConfig(_)
            | Error::RowShape(_)
            | Error::PathOutsideRoot { .. } => ErrorKind::Configuration,
            Error::MalformedDataset { .. } | Error::Storage(_) | Error::Io(_) => ErrorKind::Storage,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    #[inline]
    #[must_use]
    pub fn is_storage(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }
}
