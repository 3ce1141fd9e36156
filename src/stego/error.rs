//! Typed failure kinds for the decode engine.
//!
//! Every kind is a local, deterministic, non-retryable condition: decoding
//! the same image again yields the same error, so nothing here warrants an
//! internal retry. The HTTP layer maps each kind to its own status and
//! message, which is why none of them collapse into a generic "decode
//! failed".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bitstream ran out before a read could be satisfied. The cursor
    /// never wraps; exceeding the available bits is always an error.
    #[error("bitstream exhausted: requested {requested} bits with {remaining} remaining")]
    OutOfBounds { requested: u64, remaining: u64 },

    /// The decoded header fields violate capacity or sanity constraints.
    /// This is the primary defense against treating a plain photograph as a
    /// steganographic image.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The header declares more payload bytes than the image can supply.
    #[error("truncated payload: header declares {declared} bytes but only {available} fit in the remaining bitstream")]
    TruncatedPayload { declared: u64, available: u64 },

    /// The CRC-32 recomputed over the extracted payload disagrees with the
    /// header's stored value.
    #[error("checksum mismatch: header stores {stored:#010x}, payload hashes to {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// The image cannot yield a coherent bit layout (zero pixels, or too
    /// small to hold even the header).
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
