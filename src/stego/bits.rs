//! # LSB Bitstream Access
//!
//! Sequential bit-level views over a pixel grid, in the fixed v1 scan order
//! (see the module docs at [`crate::stego`]): row-major over pixels, then
//! channels in R, G, B(, A) order, taking the single least-significant bit
//! of each channel byte. Bytes are reassembled most-significant-bit first.
//!
//! [`BitReader`] and [`BitWriter`] are exact inverses of each other; the
//! reader is a pure function of (grid, cursor) and never mutates the image.

use crate::grid::PixelGrid;
use crate::stego::error::{DecodeError, Result};
use crate::stego::header::CodecConfig;

/// Cursor-driven reader over the hidden bitstream of a pixel grid.
pub struct BitReader<'a> {
    grid: &'a PixelGrid,
    channels: usize,
    cursor: u64,
}

impl<'a> BitReader<'a> {
    pub fn new(grid: &'a PixelGrid, config: CodecConfig) -> Self {
        Self {
            grid,
            channels: config.channels.count(),
            cursor: 0,
        }
    }

    /// Total embeddable bits: pixel count times participating channels.
    pub fn capacity_bits(&self) -> u64 {
        self.grid.pixel_count() * self.channels as u64
    }

    pub fn remaining_bits(&self) -> u64 {
        self.capacity_bits() - self.cursor
    }

    /// Read the next bit in scan order, advancing the cursor.
    pub fn read_bit(&mut self) -> Result<u8> {
        if self.cursor >= self.capacity_bits() {
            return Err(DecodeError::OutOfBounds {
                requested: 1,
                remaining: 0,
            });
        }
        let pixel = self.cursor / self.channels as u64;
        let channel = (self.cursor % self.channels as u64) as usize;
        self.cursor += 1;
        Ok(self.grid.channel(pixel, channel) & 1)
    }

    /// Read `n` bits (at most 64) into an integer, first bit ending up most
    /// significant.
    pub fn read_bits(&mut self, n: u32) -> Result<u64> {
        debug_assert!(n <= 64);
        if u64::from(n) > self.remaining_bits() {
            return Err(DecodeError::OutOfBounds {
                requested: u64::from(n),
                remaining: self.remaining_bits(),
            });
        }
        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_bits(32)? as u32)
    }

    /// Fill `buf` with the next `buf.len()` bytes of the bitstream. Checks
    /// the full length up front so a failure never consumes bits.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let needed = buf.len() as u64 * 8;
        if needed > self.remaining_bits() {
            return Err(DecodeError::OutOfBounds {
                requested: needed,
                remaining: self.remaining_bits(),
            });
        }
        for slot in buf.iter_mut() {
            *slot = self.read_u8()?;
        }
        Ok(())
    }
}

/// Mutating counterpart of [`BitReader`], used by the embedder. Writes each
/// bit into the least-significant bit of the channel byte under the cursor.
pub struct BitWriter<'a> {
    grid: &'a mut PixelGrid,
    channels: usize,
    cursor: u64,
}

impl<'a> BitWriter<'a> {
    pub fn new(grid: &'a mut PixelGrid, config: CodecConfig) -> Self {
        Self {
            channels: config.channels.count(),
            grid,
            cursor: 0,
        }
    }

    pub fn capacity_bits(&self) -> u64 {
        self.grid.pixel_count() * self.channels as u64
    }

    pub fn remaining_bits(&self) -> u64 {
        self.capacity_bits() - self.cursor
    }

    pub fn write_bit(&mut self, bit: u8) -> Result<()> {
        if self.cursor >= self.capacity_bits() {
            return Err(DecodeError::OutOfBounds {
                requested: 1,
                remaining: 0,
            });
        }
        let pixel = self.cursor / self.channels as u64;
        let channel = (self.cursor % self.channels as u64) as usize;
        let byte = self.grid.channel(pixel, channel);
        self.grid
            .set_channel(pixel, channel, (byte & 0xFE) | (bit & 1));
        self.cursor += 1;
        Ok(())
    }

    /// Write the low `n` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, n: u32) -> Result<()> {
        debug_assert!(n <= 64);
        for i in (0..n).rev() {
            self.write_bit(((value >> i) & 1) as u8)?;
        }
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bits(u64::from(value), 8)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bits(u64::from(value), 32)
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = bytes.len() as u64 * 8;
        if needed > self.remaining_bits() {
            return Err(DecodeError::OutOfBounds {
                requested: needed,
                remaining: self.remaining_bits(),
            });
        }
        for &b in bytes {
            self.write_u8(b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::header::ChannelSelect;

    fn rgb_config() -> CodecConfig {
        CodecConfig::V1
    }

    #[test]
    fn test_capacity_excludes_alpha_by_default() {
        let grid = PixelGrid::from_rgba(10, 10, vec![0u8; 400]).unwrap();
        let reader = BitReader::new(&grid, rgb_config());
        assert_eq!(reader.capacity_bits(), 300);

        let rgba = CodecConfig {
            channels: ChannelSelect::Rgba,
        };
        let reader = BitReader::new(&grid, rgba);
        assert_eq!(reader.capacity_bits(), 400);
    }

    #[test]
    fn test_read_bit_scan_order() {
        // Pixel 0 = (1, 0, 1, 0), pixel 1 = (0, 1, 0, 1): alpha never read
        // under the v1 config, so the stream is 1,0,1, 0,1,0.
        let grid = PixelGrid::from_rgba(2, 1, vec![1, 0, 1, 0, 0, 1, 0, 1]).unwrap();
        let mut reader = BitReader::new(&grid, rgb_config());
        let bits: Vec<u8> = (0..6).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, vec![1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_read_bits_msb_first() {
        // LSBs spell 0b10100101 across the first three pixels.
        let lsbs = [1u8, 0, 1, 0, 0, 1, 0, 1];
        let mut data = vec![0u8; 12];
        for (i, bit) in lsbs.iter().enumerate() {
            data[(i / 3) * 4 + (i % 3)] = 0xFE | bit;
        }
        let grid = PixelGrid::from_rgba(3, 1, data).unwrap();
        let mut reader = BitReader::new(&grid, rgb_config());
        assert_eq!(reader.read_u8().unwrap(), 0b1010_0101);
    }

    #[test]
    fn test_out_of_bounds_is_error_not_wraparound() {
        let grid = PixelGrid::from_rgba(1, 1, vec![0u8; 4]).unwrap();
        let mut reader = BitReader::new(&grid, rgb_config());
        assert_eq!(reader.capacity_bits(), 3);
        assert!(reader.read_bits(3).is_ok());
        match reader.read_bit() {
            Err(DecodeError::OutOfBounds { remaining, .. }) => assert_eq!(remaining, 0),
            other => panic!("expected OutOfBounds, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_read_exact_fails_without_consuming() {
        let grid = PixelGrid::from_rgba(2, 1, vec![0u8; 8]).unwrap();
        let mut reader = BitReader::new(&grid, rgb_config());
        let mut buf = [0u8; 2];
        assert!(matches!(
            reader.read_exact(&mut buf),
            Err(DecodeError::OutOfBounds { .. })
        ));
        assert_eq!(reader.remaining_bits(), 6);
    }

    #[test]
    fn test_writer_reader_inverse() {
        let mut grid = PixelGrid::from_rgba(8, 8, vec![0xABu8; 256]).unwrap();
        {
            let mut writer = BitWriter::new(&mut grid, rgb_config());
            writer.write_u32(0xDEAD_BEEF).unwrap();
            writer.write_all(b"xyz").unwrap();
        }
        let mut reader = BitReader::new(&grid, rgb_config());
        assert_eq!(reader.read_u32().unwrap(), 0xDEAD_BEEF);
        let mut buf = [0u8; 3];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"xyz");
    }

    #[test]
    fn test_writer_touches_only_lsbs() {
        let mut grid = PixelGrid::from_rgba(4, 1, vec![0xFFu8; 16]).unwrap();
        {
            let mut writer = BitWriter::new(&mut grid, rgb_config());
            writer.write_bits(0, 12).unwrap();
        }
        for pixel in 0..4u64 {
            for ch in 0..3 {
                assert_eq!(grid.channel(pixel, ch), 0xFE);
            }
            // Alpha is reserved and never written under v1.
            assert_eq!(grid.channel(pixel, 3), 0xFF);
        }
    }
}
