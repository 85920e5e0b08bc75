//! Binary layout of a backup file.
//!
//! ```text
//! offset  size  field
//! 0       8     magic, "SHELFBAK"
//! 8       2     format version, little endian
//! 10      1     compression id
//! 11      1     reserved, zero
//! 12      4     CRC32 of the compressed payload, little endian
//! 16      8     compressed payload length, little endian
//! 24      ..    compressed JSON snapshot
//! ```
//!
//! Encoding is deterministic: the same snapshot and compression always give
//! the same bytes.

use crate::error::{ErrorKind, FormatError, Result};
use crate::snapshot::{SNAPSHOT_VERSION, Snapshot};
use exn::ResultExt;
use shelf_compress::Compression;
use time::UtcDateTime;
use tracing::instrument;

pub const MAGIC: [u8; 8] = *b"SHELFBAK";
pub const FORMAT_VERSION: u16 = 1;
pub const HEADER_LEN: usize = 24;
/// File extension of backup files, without the dot.
pub const EXTENSION: &str = "shbak";

/// Fixed-size header in front of every backup payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u16,
    pub compression: Compression,
    pub checksum: u32,
    pub length: u64,
}

impl Header {
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..8].copy_from_slice(&MAGIC);
        bytes[8..10].copy_from_slice(&self.version.to_le_bytes());
        bytes[10] = self.compression.id();
        bytes[12..16].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.length.to_le_bytes());
        bytes
    }

    /// Parse and check the header, without looking at the payload.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let Some(header) = bytes.get(..HEADER_LEN) else {
            exn::bail!(ErrorKind::Format(FormatError::Truncated));
        };
        if header[..8] != MAGIC {
            exn::bail!(ErrorKind::Format(FormatError::Magic));
        }
        let version = u16::from_le_bytes([header[8], header[9]]);
        if version != FORMAT_VERSION {
            exn::bail!(ErrorKind::Format(FormatError::Version(version)));
        }
        let id = header[10];
        let compression = Compression::from_id(id).or_raise(|| ErrorKind::Format(FormatError::Compression(id)))?;
        let mut checksum = [0u8; 4];
        checksum.copy_from_slice(&header[12..16]);
        let mut length = [0u8; 8];
        length.copy_from_slice(&header[16..24]);
        Ok(Self {
            version,
            compression,
            checksum: u32::from_le_bytes(checksum),
            length: u64::from_le_bytes(length),
        })
    }
}

#[instrument(skip(snapshot), fields(entries = snapshot.entries.len()))]
pub fn encode(snapshot: &Snapshot, compression: Compression) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(snapshot).or_raise(|| ErrorKind::Encode)?;
    let payload = compression.compress(&json).or_raise(|| ErrorKind::Encode)?;
    let header = Header {
        version: FORMAT_VERSION,
        compression,
        checksum: crc32fast::hash(&payload),
        length: u64::try_from(payload.len()).or_raise(|| ErrorKind::Encode)?,
    };
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(&payload);
    tracing::debug!(json = json.len(), compressed = payload.len(), "snapshot encoded");
    Ok(bytes)
}

/// Decode a complete backup file.
///
/// Any problem is reported as [`ErrorKind::Format`]; a snapshot is either
/// decoded completely or not at all.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> Result<Snapshot> {
    let header = Header::parse(bytes)?;
    let payload = &bytes[HEADER_LEN..];
    let expected = usize::try_from(header.length).or_raise(|| ErrorKind::Format(FormatError::Length))?;
    if payload.len() < expected {
        exn::bail!(ErrorKind::Format(FormatError::Truncated));
    }
    if payload.len() > expected {
        exn::bail!(ErrorKind::Format(FormatError::Length));
    }
    if crc32fast::hash(payload) != header.checksum {
        exn::bail!(ErrorKind::Format(FormatError::Checksum));
    }
    let json = header.compression.decompress(payload).or_raise(|| ErrorKind::Format(FormatError::Payload))?;
    let snapshot: Snapshot = serde_json::from_slice(&json).or_raise(|| ErrorKind::Format(FormatError::Payload))?;
    if snapshot.version != SNAPSHOT_VERSION {
        exn::bail!(ErrorKind::Format(FormatError::Version(snapshot.version)));
    }
    Ok(snapshot)
}

/// Canonical file name for a backup taken at `now`: `shelf_YYYY-MM-DD_HH-MM.shbak`.
pub fn backup_filename(now: UtcDateTime) -> String {
    format!(
        "shelf_{:04}-{:02}-{:02}_{:02}-{:02}.{EXTENSION}",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{CategorySnapshot, EntrySnapshot};
    use rstest::rstest;
    use time::macros::utc_datetime;

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot.entries.push(EntrySnapshot {
            source: 1,
            url: "/m/1".to_string(),
            title: "Title".to_string(),
            favorite: true,
            categories: vec![0],
            ..EntrySnapshot::default()
        });
        snapshot.categories.push(CategorySnapshot {
            name: "Favorites".to_string(),
            order: 0,
            flags: 0,
        });
        snapshot.sources.insert(1, "Source".to_string());
        snapshot
    }

    fn format_error(bytes: &[u8]) -> FormatError {
        match &*decode(bytes).unwrap_err() {
            ErrorKind::Format(format) => *format,
            other => panic!("expected a format error, got {other}"),
        }
    }

    #[rstest]
    #[case(Compression::None)]
    #[case(Compression::Gzip)]
    #[case(Compression::Bzip2)]
    fn test_decode_what_was_encoded(#[case] compression: Compression) {
        let bytes = encode(&snapshot(), compression).unwrap();
        assert_eq!(Header::parse(&bytes).unwrap().compression, compression);
        assert_eq!(decode(&bytes).unwrap(), snapshot());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(encode(&snapshot(), Compression::Gzip).unwrap(), encode(&snapshot(), Compression::Gzip).unwrap());
    }

    #[test]
    fn test_short_input() {
        assert_eq!(format_error(b"SHELF"), FormatError::Truncated);
        assert_eq!(format_error(&[]), FormatError::Truncated);
    }

    #[test]
    fn test_wrong_magic() {
        let mut bytes = encode(&snapshot(), Compression::None).unwrap();
        bytes[0] = b'X';
        assert_eq!(format_error(&bytes), FormatError::Magic);
    }

    #[test]
    fn test_unsupported_version() {
        let mut bytes = encode(&snapshot(), Compression::None).unwrap();
        bytes[8..10].copy_from_slice(&2u16.to_le_bytes());
        assert_eq!(format_error(&bytes), FormatError::Version(2));
    }

    #[test]
    fn test_unknown_compression() {
        let mut bytes = encode(&snapshot(), Compression::None).unwrap();
        bytes[10] = 200;
        assert_eq!(format_error(&bytes), FormatError::Compression(200));
    }

    #[test]
    fn test_length_mismatch() {
        let bytes = encode(&snapshot(), Compression::Gzip).unwrap();
        assert_eq!(format_error(&bytes[..bytes.len() - 1]), FormatError::Truncated);
        let mut longer = bytes.clone();
        longer.push(0);
        assert_eq!(format_error(&longer), FormatError::Length);
    }

    #[test]
    fn test_corrupted_payload() {
        let mut bytes = encode(&snapshot(), Compression::Gzip).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        assert_eq!(format_error(&bytes), FormatError::Checksum);
    }

    #[test]
    fn test_payload_that_is_not_a_snapshot() {
        let payload = br#"{"entries": "nope"}"#;
        let header = Header {
            version: FORMAT_VERSION,
            compression: Compression::None,
            checksum: crc32fast::hash(payload),
            length: payload.len() as u64,
        };
        let mut bytes = header.to_bytes().to_vec();
        bytes.extend_from_slice(payload);
        assert_eq!(format_error(&bytes), FormatError::Payload);
    }

    #[test]
    fn test_backup_filename() {
        assert_eq!(backup_filename(utc_datetime!(2024-03-07 09:05:59)), "shelf_2024-03-07_09-05.shbak");
    }
}
