//! Error types for the dataset store.
//!
//! Every failure is classified into one of a handful of [`ErrorKind`]s so
//! callers can react to "not found" or "bad input" without matching on
//! every variant.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`crate::Store`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failure on an already open store.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The database file could not be opened or created.
    #[error("cannot open database {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The CSV input could not be read.
    #[error("cannot read {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV input has no header line.
    #[error("input has no header line")]
    MissingHeader,

    /// A required column is absent from the CSV header.
    #[error("required column '{0}' is missing from the header")]
    MissingColumn(&'static str),

    /// The record table has never been created in this database.
    #[error("table '{0}' does not exist; load a dataset first")]
    MissingTable(&'static str),

    /// A value could not be coerced to its column type.
    #[error("line {line}, column '{column}': cannot parse {value:?} ({reason})")]
    Parse {
        line: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// A lookup matched no rows.
    #[error("no record with {key} = {value}")]
    NotFound { key: &'static str, value: String },
}

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Storage,
    Input,
    Schema,
    Parse,
    NotFound,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Storage(_) | StoreError::Open { .. } => ErrorKind::Storage,
            StoreError::Input { .. } => ErrorKind::Input,
            StoreError::MissingHeader
            | StoreError::MissingColumn(_)
            | StoreError::MissingTable(_) => ErrorKind::Schema,
            StoreError::Parse { .. } => ErrorKind::Parse,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
