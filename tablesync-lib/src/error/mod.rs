//! Error types

mod filter;

pub use filter::*;

use thiserror::Error;

/// Errors returned by the table coordinator and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// A filter operation was rejected.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Page sizes must be positive.
    #[error("invalid page size: {0}")]
    InvalidPageSize(u32),

    /// The column is not part of the table's column definitions.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The column exists but cannot be sorted.
    #[error("column is not sortable: {0}")]
    NotSortable(String),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// The remote data source failed.
    #[error("data source error: {0}")]
    Source(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps a data source error.
    pub fn source_error(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Source(err.into())
    }
}
