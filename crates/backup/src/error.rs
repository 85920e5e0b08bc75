//! Backup Error Types
//!
//! Only [`ErrorKind::Format`], [`ErrorKind::Encode`] and
//! [`ErrorKind::Config`] are ever returned as an `Err`. The per-entry kinds are
//! recorded in a [`RestoreReport`](crate::RestoreReport) while the run carries on.

use derive_more::{Display, Error};

/// A backup error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for backup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes are not a readable snapshot. Nothing was restored.
    #[display("malformed backup: {_0}")]
    Format(FormatError),
    /// The entry's source is not installed; the entry was restored offline.
    #[display("source not installed: {_0}")]
    SourceMissing(#[error(not(source))] String),
    /// Talking to the source failed; the entry was restored offline.
    #[display("could not fetch from source")]
    Fetch,
    /// Writing to the library failed; this part of the entry was rolled back.
    #[display("could not write to the library")]
    Persistence,
    /// Building or serializing a snapshot failed.
    #[display("could not create backup")]
    Encode,
    /// The configuration cannot be turned into backup settings.
    #[display("invalid backup configuration")]
    Config,
}

/// Why a snapshot could not be decoded.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[display("file is truncated")]
    Truncated,
    #[display("not a backup file")]
    Magic,
    #[display("unsupported format version {_0}")]
    Version(#[error(not(source))] u16),
    #[display("unknown compression id {_0}")]
    Compression(#[error(not(source))] u8),
    #[display("payload length does not match header")]
    Length,
    #[display("payload checksum does not match header")]
    Checksum,
    #[display("payload could not be decoded")]
    Payload,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch)
    }

    /// Short label used in restore logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Format(_) => "format",
            Self::SourceMissing(_) => "source missing",
            Self::Fetch => "fetch",
            Self::Persistence => "persistence",
            Self::Encode => "encode",
            Self::Config => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display() {
        let kind = ErrorKind::Format(FormatError::Version(9));
        assert_eq!(kind.to_string(), "malformed backup: unsupported format version 9");
        assert!(!kind.is_retryable());
        assert!(ErrorKind::Fetch.is_retryable());
    }
}
