use std::path::PathBuf;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger {path} is not accessible: {message}")]
    IoFailure { path: PathBuf, message: String },
    #[error("invalid record: {field} {reason}")]
    InvalidRecord { field: &'static str, reason: String },
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        LedgerError::IoFailure {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::InvalidRecord {
            field,
            reason: reason.into(),
        }
    }
}
