//! # LSB Steganography Codec
//!
//! Recovers files covertly embedded in an image's pixel data, and embeds
//! them in the first place.
//!
//! ## Wire format (v1)
//!
//! The bit layout is the compatibility contract of this crate: decode must
//! be the exact inverse of however the encoder wrote bits, so any change
//! here is a new codec version, selected through [`CodecConfig`].
//!
//! - **Scan order**: row-major over pixels; within a pixel, channels in
//!   R, G, B order (alpha is reserved and never carries data under v1).
//! - **Bit depth**: only bit 0 (the least-significant bit) of each channel
//!   byte participates.
//! - **Byte assembly**: 8 consecutive stream bits form a byte, most
//!   significant bit first; multi-byte integers are big-endian.
//! - **Header**: 72 bits at stream offset 0 — `u32` payload length in
//!   bytes, `u8` type tag, `u32` CRC-32 over the payload.
//!
//! ## Pipeline
//!
//! raw pixels → [`bits::BitReader`] → [`header::Header`] →
//! [`extract::extract`] → [`sniff::sniff`] → [`engine::DecodeResult`],
//! orchestrated by [`engine::DecodeEngine`] with a typed failure for every
//! way a non-stego or corrupted image can disagree with the format.

pub mod bits;
pub mod embed;
pub mod engine;
pub mod error;
pub mod extract;
pub mod header;
pub mod sniff;

pub use embed::embed;
pub use engine::{DecodeEngine, DecodeResult};
pub use error::{DecodeError, Result};
pub use header::{ChannelSelect, CodecConfig, Header, PayloadTag, HEADER_BITS};
pub use sniff::sniff;
