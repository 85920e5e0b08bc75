//! Compression Error Types

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// An encoder or decoder could not be set up.
    #[display("could not initialize codec")]
    Encoder,
    /// The payload is not valid for its format.
    #[display("invalid or corrupted data")]
    InvalidData,
    #[display("unsupported compression: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// Known format, left out of this build.
    #[display("compression not enabled in this build: {_0}")]
    DisabledFormat(#[error(not(source))] String),
    #[display("I/O error")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io)
    }
}
