//! Persistence Error Types

use derive_more::{Display, Error};

/// A persistence error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("database error")]
    Database,
    #[display("database migration error")]
    Migration,
    /// A row could not be converted to or from its domain model.
    #[display("invalid library data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
    /// An update was requested for a record that was never persisted.
    #[display("{_0} has no id")]
    MissingId(#[error(not(source))] &'static str),
    /// An update matched no row.
    #[display("{_0} not found")]
    NotFound(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
