//! Configuration Error Types

use derive_more::{Display, Error};
use shelf_compress::error::{Error as CompressionError, ErrorKind as CompressionErrorKind};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// An explicitly requested configuration file does not exist
    #[display("configuration file not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    /// The file extension does not name a known configuration format
    #[display("unsupported configuration format: {}", _0.display())]
    UnsupportedFormat(#[error(not(source))] PathBuf),
    /// Merging or deserializing the configuration sources failed
    #[display("could not load configuration")]
    Load,
    /// A value was read but does not make sense
    #[display("invalid configuration value for {_0}")]
    Invalid(#[error(not(source))] &'static str),
    /// The configured compression format cannot be used
    #[display("compression error: {_0}")]
    Compression(CompressionErrorKind),
}

impl ErrorKind {
    /// Convert a compression error, keeping the compress crate's frame as a
    /// child in the error tree.
    #[track_caller]
    pub fn compression(err: CompressionError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Compression(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
