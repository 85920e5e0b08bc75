use crate::Compression;
use crate::error::{ErrorKind, Result};
use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use exn::ResultExt;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::{self, Read, Write};
use tracing::instrument;

// Fixed levels keep the output identical for identical input.
const GZIP_LEVEL: flate2::Compression = flate2::Compression::new(6);
const BZIP2_LEVEL: bzip2::Compression = bzip2::Compression::best();
#[cfg(feature = "zstd")]
const ZSTD_LEVEL: i32 = 19;

impl Compression {
    /// Compress a whole payload in memory.
    ///
    /// ```
    /// use shelf_compress::Compression;
    ///
    /// let packed = Compression::Gzip.compress(b"{\"version\":1}").unwrap();
    /// assert_eq!(Compression::Gzip.decompress(&packed).unwrap(), b"{\"version\":1}");
    /// ```
    #[instrument(level = "debug", skip(input), fields(format = %self, input_size = input.len()))]
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let output = match self {
            Self::None => input.to_vec(),
            Self::Gzip => encode(GzEncoder::new(Vec::new(), GZIP_LEVEL), input, GzEncoder::finish)?,
            Self::Bzip2 => encode(BzEncoder::new(Vec::new(), BZIP2_LEVEL), input, BzEncoder::finish)?,
            #[cfg(feature = "zstd")]
            Self::Zstd => {
                let encoder = zstd::Encoder::new(Vec::new(), ZSTD_LEVEL).or_raise(|| ErrorKind::Encoder)?;
                encode(encoder, input, zstd::Encoder::finish)?
            }
        };
        tracing::debug!(output_size = output.len(), "payload compressed");
        Ok(output)
    }

    /// Decompress a whole payload in memory.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidData`] if `input` is not valid for this format.
    #[instrument(level = "debug", skip(input), fields(format = %self, input_size = input.len()))]
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::None => Ok(input.to_vec()),
            Self::Gzip => decode(GzDecoder::new(input)),
            Self::Bzip2 => decode(BzDecoder::new(input)),
            #[cfg(feature = "zstd")]
            Self::Zstd => decode(zstd::Decoder::new(input).or_raise(|| ErrorKind::Encoder)?),
        }
    }
}

fn encode<W: Write>(mut encoder: W, input: &[u8], finish: impl FnOnce(W) -> io::Result<Vec<u8>>) -> Result<Vec<u8>> {
    encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
    finish(encoder).or_raise(|| ErrorKind::Io)
}

fn decode(mut decoder: impl Read) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decoder.read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use crate::error::ErrorKind;
    use rstest::rstest;

    const PAYLOAD: &[u8] = br#"{"version":1,"entries":[{"source":1,"url":"/m/1","title":"Test"}]}"#;

    #[rstest]
    #[case(Compression::None)]
    #[case(Compression::Gzip)]
    #[case(Compression::Bzip2)]
    #[cfg_attr(feature = "zstd", case(Compression::Zstd))]
    fn test_payload_survives(#[case] format: Compression) {
        let packed = format.compress(PAYLOAD).unwrap();
        assert_eq!(format.decompress(&packed).unwrap(), PAYLOAD);
    }

    #[rstest]
    #[case(Compression::Gzip)]
    #[case(Compression::Bzip2)]
    fn test_same_input_same_bytes(#[case] format: Compression) {
        assert_eq!(format.compress(PAYLOAD).unwrap(), format.compress(PAYLOAD).unwrap());
        assert_ne!(format.compress(PAYLOAD).unwrap(), PAYLOAD);
    }

    #[rstest]
    #[case(Compression::Gzip)]
    #[case(Compression::Bzip2)]
    fn test_garbage_is_invalid(#[case] format: Compression) {
        let err = format.decompress(PAYLOAD).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidData);
    }
}
