//! Payload extraction: pull exactly the bytes the header declared.
//!
//! Extraction is all-or-nothing. A bitstream that cannot supply the full
//! declared length fails with [`DecodeError::TruncatedPayload`] and no
//! partial buffer is ever returned; a header-shaped coincidence in a
//! non-stego image must not surface as a plausible payload.

use crate::stego::bits::BitReader;
use crate::stego::error::{DecodeError, Result};
use crate::stego::header::Header;

/// Read `header.payload_length` bytes immediately following the header,
/// assembling each byte from 8 consecutive bits in scan order.
pub fn extract(reader: &mut BitReader<'_>, header: &Header) -> Result<Vec<u8>> {
    let declared = u64::from(header.payload_length);
    let available = reader.remaining_bits() / 8;
    if declared > available {
        return Err(DecodeError::TruncatedPayload {
            declared,
            available,
        });
    }
    let mut payload = vec![0u8; header.payload_length as usize];
    reader.read_exact(&mut payload)?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::PixelGrid;
    use crate::stego::bits::BitWriter;
    use crate::stego::header::{CodecConfig, PayloadTag};

    #[test]
    fn test_extracts_exact_declared_bytes() {
        let mut grid = PixelGrid::from_rgba(8, 8, vec![0u8; 256]).unwrap();
        let header = Header {
            payload_length: 4,
            tag: PayloadTag::Unknown,
            checksum: 0,
        };
        {
            let mut writer = BitWriter::new(&mut grid, CodecConfig::V1);
            header.write(&mut writer).unwrap();
            writer.write_all(b"abcdTRAILING").unwrap();
        }
        let mut reader = BitReader::new(&grid, CodecConfig::V1);
        let parsed = Header::parse(&mut reader).unwrap();
        let payload = extract(&mut reader, &parsed).unwrap();
        assert_eq!(payload, b"abcd");
    }

    #[test]
    fn test_truncated_payload_returns_nothing() {
        // 30 pixels = 90 bits: 18 bits after the header, so 2 whole bytes.
        let grid = PixelGrid::from_rgba(30, 1, vec![0u8; 120]).unwrap();
        let mut reader = BitReader::new(&grid, CodecConfig::V1);
        reader.read_bits(64).unwrap();
        reader.read_bits(8).unwrap();
        let header = Header {
            payload_length: 3,
            tag: PayloadTag::Unknown,
            checksum: 0,
        };
        match extract(&mut reader, &header) {
            Err(DecodeError::TruncatedPayload {
                declared,
                available,
            }) => {
                assert_eq!(declared, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected TruncatedPayload, got {:?}", other.map(|_| ())),
        }
    }
}
