//! Source Error Types

use derive_more::{Display, Error};

/// A source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ErrorKind {
    /// Request failed or timed out
    #[display("network error: {_0}")]
    Network(#[error(not(source))] String),
    /// The source answered with something it could not make sense of
    #[display("unexpected response: {_0}")]
    Parse(#[error(not(source))] String),
    /// The source no longer serves the requested entry
    #[display("not found on source: {_0}")]
    NotFound(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
