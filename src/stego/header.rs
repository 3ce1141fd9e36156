//! # Header Codec
//!
//! The fixed 72-bit header embedded at bitstream offset 0:
//!
//! ```text
//! +----------------------+-----------+------------------------+
//! | payload_length (u32) | tag (u8)  | checksum CRC-32 (u32)  |
//! +----------------------+-----------+------------------------+
//! ```
//!
//! All integers are big-endian. The checksum covers the payload bytes only
//! and is verified by the engine after extraction, not here.
//!
//! Parsing validates `payload_length` against the carrier's capacity before
//! any payload bits are read; a plain photograph whose LSB noise happens to
//! decode to an absurd length is rejected at this stage.

use crate::stego::bits::{BitReader, BitWriter};
use crate::stego::error::{DecodeError, Result};

/// Width of the embedded header in bits.
pub const HEADER_BITS: u64 = 72;

/// Which pixel channels carry hidden bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSelect {
    /// Red, green, blue; alpha reserved. The v1 compatibility default.
    Rgb,
    /// All four channels, including alpha.
    Rgba,
}

impl ChannelSelect {
    pub const fn count(&self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Immutable codec configuration, passed into every engine construction.
///
/// The bit-scan order and header layout are the wire format: change either
/// and previously encoded images stop decoding. Keeping the configuration
/// explicit lets several codec versions coexist behind distinct values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub channels: ChannelSelect,
}

impl CodecConfig {
    /// Layout version 1: RGB channels, LSB only, row-major, MSB-first bytes.
    pub const V1: CodecConfig = CodecConfig {
        channels: ChannelSelect::Rgb,
    };
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::V1
    }
}

/// Payload type tag carried in the header. Code 0 is the "unknown" sentinel;
/// unrecognized codes decode as [`PayloadTag::Unknown`] so a corrupt tag
/// degrades to sniffing instead of failing the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadTag {
    Unknown,
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Tiff,
    Ico,
    Mp4,
    Avi,
    Mkv,
    Mov,
    Mp3,
    Wav,
    Pdf,
}

impl PayloadTag {
    pub const fn code(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Png => 1,
            Self::Jpeg => 2,
            Self::Gif => 3,
            Self::Webp => 4,
            Self::Bmp => 5,
            Self::Tiff => 6,
            Self::Ico => 7,
            Self::Mp4 => 8,
            Self::Avi => 9,
            Self::Mkv => 10,
            Self::Mov => 11,
            Self::Mp3 => 12,
            Self::Wav => 13,
            Self::Pdf => 14,
        }
    }

    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Png,
            2 => Self::Jpeg,
            3 => Self::Gif,
            4 => Self::Webp,
            5 => Self::Bmp,
            6 => Self::Tiff,
            7 => Self::Ico,
            8 => Self::Mp4,
            9 => Self::Avi,
            10 => Self::Mkv,
            11 => Self::Mov,
            12 => Self::Mp3,
            13 => Self::Wav,
            14 => Self::Pdf,
            _ => Self::Unknown,
        }
    }

    /// Type label for the result envelope, or `None` for the sentinel.
    pub const fn label(&self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Png => Some("png"),
            Self::Jpeg => Some("jpeg"),
            Self::Gif => Some("gif"),
            Self::Webp => Some("webp"),
            Self::Bmp => Some("bmp"),
            Self::Tiff => Some("tiff"),
            Self::Ico => Some("ico"),
            Self::Mp4 => Some("mp4"),
            Self::Avi => Some("avi"),
            Self::Mkv => Some("mkv"),
            Self::Mov => Some("mov"),
            Self::Mp3 => Some("mp3"),
            Self::Wav => Some("wav"),
            Self::Pdf => Some("pdf"),
        }
    }

    /// Inverse of [`label`](Self::label); `None` for unrecognized labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            "tiff" => Some(Self::Tiff),
            "ico" => Some(Self::Ico),
            "mp4" => Some(Self::Mp4),
            "avi" => Some(Self::Avi),
            "mkv" => Some(Self::Mkv),
            "mov" => Some(Self::Mov),
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Payload size in bytes.
    pub payload_length: u32,
    pub tag: PayloadTag,
    /// CRC-32 (IEEE) over the payload bytes.
    pub checksum: u32,
}

impl Header {
    /// Consume exactly [`HEADER_BITS`] bits and decode them, validating the
    /// declared length against the reader's total capacity.
    pub fn parse(reader: &mut BitReader<'_>) -> Result<Self> {
        let payload_length = reader.read_u32()?;
        let tag = PayloadTag::from_code(reader.read_u8()?);
        let checksum = reader.read_u32()?;

        if payload_length == 0 {
            return Err(DecodeError::MalformedHeader(
                "declared payload length is zero".to_string(),
            ));
        }
        let max_payload_bytes = (reader.capacity_bits() - HEADER_BITS) / 8;
        if u64::from(payload_length) > max_payload_bytes {
            return Err(DecodeError::MalformedHeader(format!(
                "declared payload of {} bytes exceeds the image's capacity of {} bytes",
                payload_length, max_payload_bytes
            )));
        }

        Ok(Self {
            payload_length,
            tag,
            checksum,
        })
    }

    /// Emit the header through a writer, the exact inverse of [`parse`](Self::parse).
    pub fn write(&self, writer: &mut BitWriter<'_>) -> Result<()> {
        writer.write_u32(self.payload_length)?;
        writer.write_u8(self.tag.code())?;
        writer.write_u32(self.checksum)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PixelGrid;

    fn grid(pixels: u32) -> PixelGrid {
        PixelGrid::from_rgba(pixels, 1, vec![0u8; pixels as usize * 4]).unwrap()
    }

    #[test]
    fn test_tag_codes_round_trip() {
        for code in 0..=20u8 {
            let tag = PayloadTag::from_code(code);
            if tag != PayloadTag::Unknown {
                assert_eq!(tag.code(), code);
            }
        }
        assert_eq!(PayloadTag::from_code(200), PayloadTag::Unknown);
        assert_eq!(PayloadTag::from_label("jpg"), Some(PayloadTag::Jpeg));
        assert_eq!(PayloadTag::from_label("nope"), None);
    }

    #[test]
    fn test_header_write_parse_round_trip() {
        // 40 pixels = 120 bits: room for the 72-bit header plus 5 bytes.
        let mut g = grid(40);
        let header = Header {
            payload_length: 5,
            tag: PayloadTag::Pdf,
            checksum: 0xCAFE_BABE,
        };
        {
            let mut writer = BitWriter::new(&mut g, CodecConfig::V1);
            header.write(&mut writer).unwrap();
        }
        let mut reader = BitReader::new(&g, CodecConfig::V1);
        let parsed = Header::parse(&mut reader).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_zero_length_is_malformed() {
        let mut g = grid(40);
        {
            let mut writer = BitWriter::new(&mut g, CodecConfig::V1);
            writer.write_u32(0).unwrap();
            writer.write_u8(0).unwrap();
            writer.write_u32(0).unwrap();
        }
        let mut reader = BitReader::new(&g, CodecConfig::V1);
        assert!(matches!(
            Header::parse(&mut reader),
            Err(DecodeError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_length_beyond_capacity_is_malformed() {
        let mut g = grid(40);
        {
            let mut writer = BitWriter::new(&mut g, CodecConfig::V1);
            // 120 bits total leaves room for 6 payload bytes; declare 7.
            writer.write_u32(7).unwrap();
            writer.write_u8(0).unwrap();
            writer.write_u32(0).unwrap();
        }
        let mut reader = BitReader::new(&g, CodecConfig::V1);
        assert!(matches!(
            Header::parse(&mut reader),
            Err(DecodeError::MalformedHeader(_))
        ));
    }
}
