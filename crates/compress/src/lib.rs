//! Compression of backup payloads.
//!
//! A backup header records which [`Compression`] its payload uses by a
//! one-byte [id](Compression::id), and configuration refers to formats by
//! [name](Compression::as_str). Gzip and bzip2 are always built in; zstd
//! needs the `zstd` feature. Its id and names stay reserved without the
//! feature, so a build lacking it reports the format as disabled rather
//! than unknown.

pub mod error;
mod format;
mod payload;

/// A supported compression format.
///
/// Defaults to [`Gzip`](Self::Gzip).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    #[default]
    Gzip,
    Bzip2,
    #[cfg(feature = "zstd")]
    Zstd,
}
