use std::io::Write;

use bytes::{BufMut, BytesMut};
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::chunk::{Chunk, IDAT, IEND, IHDR};
use crate::header::ImageHeader;
use crate::pixels::{IconStyle, PixelBuffer};
use crate::{PngError, PNG_SIGNATURE};

/// Compress data into a zlib stream at the default level
pub fn deflate(raw: &[u8]) -> Result<Vec<u8>, PngError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    Ok(encoder.finish()?)
}

/// Encode pixels as a complete PNG stream: signature, IHDR, one IDAT, IEND
pub fn encode(pixels: &PixelBuffer) -> Result<Vec<u8>, PngError> {
    let header = ImageHeader::rgba8(pixels.width(), pixels.height())?;
    let compressed = deflate(&pixels.scanlines()?)?;

    let chunks = [
        Chunk::new(IHDR, header.to_bytes().to_vec())?,
        Chunk::new(IDAT, compressed)?,
        Chunk::new(IEND, Vec::new())?,
    ];

    let total = PNG_SIGNATURE.len() + chunks.iter().map(Chunk::encoded_len).sum::<usize>();
    let mut out = BytesMut::with_capacity(total);
    out.put_slice(&PNG_SIGNATURE);
    for chunk in &chunks {
        chunk.write_to(&mut out);
    }

    Ok(out.to_vec())
}

/// Paint and encode an icon in one step
pub fn encode_icon(width: u32, height: u32, style: &IconStyle) -> Result<Vec<u8>, PngError> {
    let pixels = PixelBuffer::new(width, height, style)?;
    encode(&pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, inflate, read_chunks, ICON_BLUE};

    #[test]
    fn test_stream_starts_with_signature() {
        let png = encode_icon(16, 16, &IconStyle::default()).unwrap();
        assert_eq!(&png[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_chunk_sequence_and_crcs() {
        let png = encode_icon(16, 16, &IconStyle::default()).unwrap();
        let chunks = read_chunks(&png).unwrap();

        let tags: Vec<_> = chunks.iter().map(|c| c.tag).collect();
        assert_eq!(tags, vec![IHDR, IDAT, IEND]);
        for chunk in &chunks {
            assert_eq!(chunk.crc, reference_crc32(&chunk.tag, &chunk.data));
        }
        assert!(chunks[2].data.is_empty());
    }

    // Bitwise CRC-32, independent of the crc crate
    fn reference_crc32(tag: &[u8], data: &[u8]) -> u32 {
        let mut crc = 0xFFFF_FFFFu32;
        for &byte in tag.iter().chain(data) {
            crc ^= byte as u32;
            for _ in 0..8 {
                crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
            }
        }
        !crc
    }

    #[test]
    fn test_4x4_icon() {
        let png = encode_icon(4, 4, &IconStyle::default()).unwrap();
        let chunks = read_chunks(&png).unwrap();

        let header = ImageHeader::from_bytes(&chunks[0].data).unwrap();
        assert_eq!((header.width, header.height), (4, 4));

        let raw = inflate(&chunks[1].data).unwrap();
        assert_eq!(raw.len(), 4 * 17);
        for line in raw.chunks_exact(17) {
            assert_eq!(line[0], 0);
            assert!(line[1..].chunks_exact(4).all(|px| px == [33u8, 150, 243, 255]));
        }
    }

    #[test]
    fn test_presets_decode_to_solid_blue() {
        for size in [192u32, 512] {
            let png = encode_icon(size, size, &IconStyle::default()).unwrap();
            let decoded = decode(&png).unwrap();

            assert_eq!(decoded.header.width, size);
            assert_eq!(decoded.header.height, size);
            assert_eq!(decoded.pixels.uniform_color(), Some(ICON_BLUE));
        }
    }

    #[test]
    fn test_readable_by_image_crate() {
        let png = encode_icon(192, 192, &IconStyle::default()).unwrap();
        let img = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();

        assert_eq!(img.dimensions(), (192, 192));
        assert!(img.pixels().all(|px| px.0 == [33, 150, 243, 255]));
    }

    #[test]
    fn test_non_square_image() {
        let png = encode_icon(3, 7, &IconStyle::default()).unwrap();
        let decoded = decode(&png).unwrap();
        assert_eq!((decoded.header.width, decoded.header.height), (3, 7));
        assert_eq!(decoded.pixels.row(6).len(), 12);
    }

    #[test]
    fn test_zero_width_is_rejected() {
        assert!(matches!(
            encode_icon(0, 192, &IconStyle::default()),
            Err(PngError::InvalidDimensions { width: 0, height: 192 })
        ));
    }
}
