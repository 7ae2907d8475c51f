use crate::pixels::buffer_len;
use crate::{PngError, BIT_DEPTH_8, BYTES_PER_PIXEL, COLOR_TYPE_RGBA, PNG_MAX_U31};

/// Length of the IHDR payload
pub const IHDR_LEN: usize = 13;

/// Contents of the IHDR chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    /// Compression method (0 = zlib deflate)
    pub compression: u8,
    /// Filter method (0 = adaptive, five filter types)
    pub filter: u8,
    /// Interlace method (0 = none)
    pub interlace: u8,
}

impl ImageHeader {
    /// Header for an 8-bit RGBA, non-interlaced image
    pub fn rgba8(width: u32, height: u32) -> Result<Self, PngError> {
        if width > PNG_MAX_U31 || height > PNG_MAX_U31 {
            return Err(PngError::ImageTooLarge { width, height });
        }
        buffer_len(width, height)?;

        Ok(Self {
            width,
            height,
            bit_depth: BIT_DEPTH_8,
            color_type: COLOR_TYPE_RGBA,
            compression: 0,
            filter: 0,
            interlace: 0,
        })
    }

    /// Bytes in one filtered row: the filter byte plus the pixels
    pub fn scanline_len(&self) -> usize {
        1 + self.width as usize * BYTES_PER_PIXEL
    }

    /// Size of the inflated IDAT stream
    pub fn raw_data_len(&self) -> usize {
        self.scanline_len() * self.height as usize
    }

    pub fn to_bytes(&self) -> [u8; IHDR_LEN] {
        let mut bytes = [0u8; IHDR_LEN];
        bytes[0..4].copy_from_slice(&self.width.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8] = self.bit_depth;
        bytes[9] = self.color_type;
        bytes[10] = self.compression;
        bytes[11] = self.filter;
        bytes[12] = self.interlace;
        bytes
    }

    /// Parse an IHDR payload, accepting only what the encoder produces
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PngError> {
        if bytes.len() != IHDR_LEN {
            return Err(PngError::InvalidHeader("IHDR must be 13 bytes"));
        }

        let width = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let height = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);

        if bytes[8] != BIT_DEPTH_8 {
            return Err(PngError::InvalidHeader("only bit depth 8 is supported"));
        }
        if bytes[9] != COLOR_TYPE_RGBA {
            return Err(PngError::InvalidHeader(
                "only colour type 6 (truecolour with alpha) is supported",
            ));
        }
        if bytes[10] != 0 || bytes[11] != 0 {
            return Err(PngError::InvalidHeader(
                "unknown compression or filter method",
            ));
        }
        if bytes[12] != 0 {
            return Err(PngError::InvalidHeader("interlaced images are not supported"));
        }

        Self::rgba8(width, height)
    }
}
