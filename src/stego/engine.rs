//! # Decode Engine
//!
//! The single entry point that orchestrates bit reading, header parsing,
//! payload extraction, integrity verification and type detection into one
//! `decode(image) -> DecodeResult` call.
//!
//! The engine is pure and stateless per call: it touches only the borrowed
//! grid and its own buffers, never blocks, and may run fully in parallel
//! with any number of other decodes. Cost is linear in pixel count.

use crate::grid::PixelGrid;
use crate::stego::bits::BitReader;
use crate::stego::error::{DecodeError, Result};
use crate::stego::extract::extract;
use crate::stego::header::{CodecConfig, Header, HEADER_BITS};
use crate::stego::sniff::sniff;

/// The one artifact returned across the core boundary. Immutable once
/// constructed; owned solely by the decode call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    /// The recovered file bytes.
    pub payload: Vec<u8>,
    /// Final type label: the header tag when recognized, otherwise the
    /// sniffed magic-byte classification.
    pub detected_type: &'static str,
    /// Payload size in bytes; always equals `payload.len()`.
    pub size: usize,
}

/// Stateless steganographic decoder for a fixed codec configuration.
#[derive(Debug, Clone, Copy)]
pub struct DecodeEngine {
    config: CodecConfig,
}

impl DecodeEngine {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Recover the file hidden in `grid`.
    ///
    /// Outcome contract: the grid must hold at least the header
    /// ([`DecodeError::UnsupportedImage`] otherwise); the header must pass
    /// its sanity checks ([`DecodeError::MalformedHeader`]); the declared
    /// payload must fit ([`DecodeError::TruncatedPayload`]); and the CRC-32
    /// recomputed over the payload must equal the stored value
    /// ([`DecodeError::ChecksumMismatch`]). Error kinds are never coerced
    /// into a generic failure.
    pub fn decode(&self, grid: &PixelGrid) -> Result<DecodeResult> {
        let mut reader = BitReader::new(grid, self.config);

        let capacity = reader.capacity_bits();
        if capacity < HEADER_BITS {
            return Err(DecodeError::UnsupportedImage(format!(
                "image holds {} embeddable bits, fewer than the {}-bit header",
                capacity, HEADER_BITS
            )));
        }

        let header = Header::parse(&mut reader)?;
        let payload = extract(&mut reader, &header)?;

        let computed = crc32fast::hash(&payload);
        if computed != header.checksum {
            return Err(DecodeError::ChecksumMismatch {
                stored: header.checksum,
                computed,
            });
        }

        let detected_type = match header.tag.label() {
            Some(label) => label,
            None => sniff(&payload),
        };

        Ok(DecodeResult {
            size: payload.len(),
            detected_type,
            payload,
        })
    }
}
