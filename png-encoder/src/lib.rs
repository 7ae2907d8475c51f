//! Minimal PNG writer for generated icons.
//!
//! Only the subset needed for solid-colour icons is supported: 8-bit
//! truecolour with alpha, filter type "None" on every scanline, a single
//! zlib-compressed IDAT chunk and no ancillary chunks. The decoder in
//! [`decode`] understands exactly what the encoder writes and is used to
//! inspect and verify generated files.

use crc::{Crc, CRC_32_ISO_HDLC};

mod chunk;
mod decode;
mod encode;
mod error;
mod header;
mod pixels;

pub use chunk::{Chunk, IDAT, IEND, IHDR};
pub use decode::{decode, inflate, read_chunks, ChunkSummary, DecodedPng};
pub use encode::{deflate, encode, encode_icon};
pub use error::PngError;
pub use header::ImageHeader;
pub use pixels::{buffer_len, IconStyle, PixelBuffer, Rgba, ICON_BLUE};

/// CRC-32 calculator for chunk integrity (the polynomial PNG and zlib share)
pub const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Eight-byte signature every PNG stream starts with
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest width, height or chunk length a PNG may declare (2^31 - 1)
pub const PNG_MAX_U31: u32 = 0x7FFF_FFFF;

/// Bytes per pixel for 8-bit RGBA
pub const BYTES_PER_PIXEL: usize = 4;

/// Filter type "None"
pub const FILTER_NONE: u8 = 0;

/// Bit depth written to IHDR
pub const BIT_DEPTH_8: u8 = 8;

/// IHDR colour type 6: truecolour with alpha
pub const COLOR_TYPE_RGBA: u8 = 6;
