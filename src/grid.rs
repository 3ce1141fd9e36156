//! # Pixel Grid
//!
//! The in-memory pixel grid that the steganography engine operates on.
//!
//! A [`PixelGrid`] is produced once per request from the encoded image bytes
//! (PNG, BMP, etc.) and discarded after decoding. The grid is stored as an
//! RGBA-interleaved byte buffer regardless of the source format, so the
//! engine always sees four channels per pixel and the codec configuration
//! decides which of them carry hidden bits.
//!
//! Container format is irrelevant once pixels are in hand, with one caveat:
//! lossy formats (JPEG) destroy LSB data, so callers should warn when the
//! source bytes arrive in one.

use anyhow::Result;

/// Number of interleaved channel bytes stored per pixel.
pub const STORED_CHANNELS: usize = 4;

/// An immutable-dimension grid of RGBA pixels.
///
/// Dimensions and channel count are fixed for the grid's lifetime. Decoding
/// only ever borrows the grid; embedding mutates channel bytes in place but
/// never resizes the buffer.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Decode encoded image bytes (any format the `image` crate supports)
    /// into an RGBA pixel grid.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    /// Build a grid from raw RGBA bytes. The buffer length must be exactly
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * STORED_CHANNELS;
        if data.len() != expected {
            anyhow::bail!(
                "RGBA buffer length mismatch: expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            );
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Channel byte for a pixel, addressed by row-major pixel index and
    /// channel index (0 = red .. 3 = alpha).
    #[inline]
    pub fn channel(&self, pixel: u64, channel: usize) -> u8 {
        self.data[pixel as usize * STORED_CHANNELS + channel]
    }

    #[inline]
    pub(crate) fn set_channel(&mut self, pixel: u64, channel: usize, value: u8) {
        self.data[pixel as usize * STORED_CHANNELS + channel] = value;
    }

    /// Re-encode the grid as PNG bytes. PNG is lossless, so embedded LSB
    /// data survives the round trip.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let img: image::RgbaImage =
            image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .ok_or_else(|| anyhow::anyhow!("pixel buffer does not match grid dimensions"))?;
        let mut out = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut out),
            image::ImageFormat::Png,
        )?;
        Ok(out)
    }
}
