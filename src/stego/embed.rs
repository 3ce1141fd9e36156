//! Embedding: the encode side of the codec.
//!
//! Writes the 72-bit header followed by the payload into the carrier's
//! channel LSBs with a [`BitWriter`] that is the exact inverse of the
//! decoder's [`BitReader`](crate::stego::bits::BitReader). The output is
//! always PNG; a lossy re-encode would destroy the hidden bits.

use anyhow::Result;
use log::info;

use crate::grid::PixelGrid;
use crate::stego::bits::BitWriter;
use crate::stego::error::DecodeError;
use crate::stego::header::{CodecConfig, Header, PayloadTag, HEADER_BITS};

/// Embed `payload` into a pixel grid in place.
///
/// Fails with [`DecodeError::UnsupportedImage`] when the header plus the
/// payload exceed the grid's capacity under `config`; the grid is untouched
/// in that case.
pub fn embed_into_grid(
    grid: &mut PixelGrid,
    payload: &[u8],
    tag: PayloadTag,
    config: CodecConfig,
) -> crate::stego::Result<()> {
    let capacity = grid.pixel_count() * config.channels.count() as u64;
    let required = HEADER_BITS + payload.len() as u64 * 8;
    if required > capacity {
        return Err(DecodeError::UnsupportedImage(format!(
            "payload needs {} bits but the image only holds {}",
            required, capacity
        )));
    }
    if payload.is_empty() || payload.len() > u32::MAX as usize {
        return Err(DecodeError::MalformedHeader(format!(
            "payload of {} bytes cannot be described by the header",
            payload.len()
        )));
    }

    let header = Header {
        payload_length: payload.len() as u32,
        tag,
        checksum: crc32fast::hash(payload),
    };

    let mut writer = BitWriter::new(grid, config);
    header.write(&mut writer)?;
    writer.write_all(payload)?;
    Ok(())
}

/// Embed `payload` into the carrier image bytes and return stego PNG bytes.
///
/// Mirrors the decode path end to end: any image format the `image` crate
/// reads is accepted as a carrier, and the result is re-encoded as PNG.
pub fn embed(
    carrier_bytes: &[u8],
    payload: &[u8],
    tag: PayloadTag,
    config: CodecConfig,
) -> Result<Vec<u8>> {
    let mut grid = PixelGrid::from_image_bytes(carrier_bytes)?;
    embed_into_grid(&mut grid, payload, tag, config)?;
    info!(
        "embedded {} payload bytes into a {}x{} carrier",
        payload.len(),
        grid.width(),
        grid.height()
    );
    grid.to_png_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_oversized_payload() {
        // 4x4 RGB = 48 bits: not even the header fits.
        let mut grid = PixelGrid::from_rgba(4, 4, vec![0u8; 64]).unwrap();
        assert!(matches!(
            embed_into_grid(&mut grid, b"x", PayloadTag::Unknown, CodecConfig::V1),
            Err(DecodeError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_rejects_empty_payload() {
        let mut grid = PixelGrid::from_rgba(16, 16, vec![0u8; 1024]).unwrap();
        assert!(matches!(
            embed_into_grid(&mut grid, b"", PayloadTag::Unknown, CodecConfig::V1),
            Err(DecodeError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_failed_embed_leaves_grid_untouched() {
        let data = vec![0x55u8; 64];
        let mut grid = PixelGrid::from_rgba(4, 4, data.clone()).unwrap();
        let before = grid.clone();
        let _ = embed_into_grid(&mut grid, b"too big", PayloadTag::Unknown, CodecConfig::V1);
        for pixel in 0..16u64 {
            for ch in 0..4 {
                assert_eq!(grid.channel(pixel, ch), before.channel(pixel, ch));
            }
        }
    }
}
