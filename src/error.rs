use std::path::PathBuf;

use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("no transactions found with {column} = \"{value}\"")]
    NotFound { column: String, value: String },
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    #[error("row {position} changed since it was listed; search again before editing")]
    StaleReference { position: usize },
    #[error("{path}:{line}: {reason}")]
    Corrupt {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to replace ledger file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl LedgerError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Errors the user can fix by answering a prompt differently. Everything
    /// else means the ledger file itself could not be read or written.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::NotFound { .. }
                | Self::InvalidSelection(_)
                | Self::StaleReference { .. }
        )
    }
}
