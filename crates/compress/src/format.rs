use crate::Compression;
use crate::error::{Error, ErrorKind, Result};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

const NONE_ID: u8 = 0;
const GZIP_ID: u8 = 1;
const BZIP2_ID: u8 = 2;
const ZSTD_ID: u8 = 3;

impl Compression {
    /// Name used in configuration files and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            #[cfg(feature = "zstd")]
            Self::Zstd => "zstd",
        }
    }

    /// Identifier written into backup headers. Part of the file format:
    /// never reassign one.
    #[must_use]
    pub fn id(&self) -> u8 {
        match self {
            Self::None => NONE_ID,
            Self::Gzip => GZIP_ID,
            Self::Bzip2 => BZIP2_ID,
            #[cfg(feature = "zstd")]
            Self::Zstd => ZSTD_ID,
        }
    }

    /// Reverse of [`id`](Self::id).
    pub fn from_id(id: u8) -> Result<Self> {
        let format = match id {
            NONE_ID => Self::None,
            GZIP_ID => Self::Gzip,
            BZIP2_ID => Self::Bzip2,
            #[cfg(feature = "zstd")]
            ZSTD_ID => Self::Zstd,
            #[cfg(not(feature = "zstd"))]
            ZSTD_ID => exn::bail!(ErrorKind::DisabledFormat("zstd".to_string())),
            other => exn::bail!(ErrorKind::UnsupportedFormat(format!("id {other}"))),
        };
        Ok(format)
    }
}

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Accepts the canonical names and the usual file extensions, ignoring case
/// and surrounding whitespace.
impl FromStr for Compression {
    type Err = Error;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        let format = match name.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "gzip" | "gz" => Self::Gzip,
            "bzip2" | "bz2" => Self::Bzip2,
            #[cfg(feature = "zstd")]
            "zstd" | "zst" => Self::Zstd,
            #[cfg(not(feature = "zstd"))]
            "zstd" | "zst" => exn::bail!(ErrorKind::DisabledFormat(name.to_string())),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(name.to_string())),
        };
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("none", Compression::None)]
    #[case("GZIP", Compression::Gzip)]
    #[case("gz", Compression::Gzip)]
    #[case(" bz2 ", Compression::Bzip2)]
    fn test_parse_name(#[case] name: &str, #[case] expected: Compression) {
        assert_eq!(name.parse::<Compression>().unwrap(), expected);
    }

    #[rstest]
    #[case("lzma")]
    #[case("")]
    fn test_parse_unknown_name(#[case] name: &str) {
        let err = name.parse::<Compression>().unwrap_err();
        assert!(matches!(*err, ErrorKind::UnsupportedFormat(_)));
    }

    #[cfg(not(feature = "zstd"))]
    #[test]
    fn test_zstd_reserved_when_disabled() {
        let err = "zst".parse::<Compression>().unwrap_err();
        assert!(matches!(*err, ErrorKind::DisabledFormat(_)));
        let err = Compression::from_id(3).unwrap_err();
        assert!(matches!(*err, ErrorKind::DisabledFormat(_)));
    }

    #[rstest]
    #[case(Compression::None, 0)]
    #[case(Compression::Gzip, 1)]
    #[case(Compression::Bzip2, 2)]
    #[cfg_attr(feature = "zstd", case(Compression::Zstd, 3))]
    fn test_header_ids(#[case] format: Compression, #[case] id: u8) {
        assert_eq!(format.id(), id);
        assert_eq!(Compression::from_id(id).unwrap(), format);
    }

    #[test]
    fn test_unknown_id() {
        let err = Compression::from_id(200).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat("id 200".to_string()));
    }

    #[test]
    fn test_display_parses_back() {
        let format = Compression::Bzip2;
        assert_eq!(format.to_string(), "bzip2");
        assert_eq!(format.to_string().parse::<Compression>().unwrap(), format);
        assert_eq!(Compression::default(), Compression::Gzip);
    }
}
