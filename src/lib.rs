//! # stegoscope
//!
//! An HTTP service that recovers files covertly embedded in image pixels
//! with LSB steganography, plus the codec library underneath it.
//!
//! ## Modules
//!
//! - [`stego`]: the decode/encode engine — the algorithmic core
//! - [`grid`]: the in-memory pixel grid the engine operates on
//! - [`web`]: axum routing and request plumbing
//! - [`config`]: TOML service configuration

pub mod config;
pub mod grid;
pub mod stego;
pub mod web;

pub use grid::PixelGrid;
pub use stego::{CodecConfig, DecodeEngine, DecodeError, DecodeResult, PayloadTag};
