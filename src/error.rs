//! Error types for loading, selection and configuration.
//!
//! Missing columns and bad cell values are not errors: they
//! degrade a single feature and are reported through
//! [`ProjectionIssues`](crate::data::projection::ProjectionIssues).

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a file into a [`RecordTable`](crate::data::table::RecordTable).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("file is not valid {encoding}: {reason}")]
    Decode {
        encoding: &'static str,
        reason: String,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("file has no header row")]
    NoHeader,
}

/// Rejected mutation of the row selection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("row {row} is out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
}

/// Failure to read or write the YAML settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOME env var not set")]
    NoHome,
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
