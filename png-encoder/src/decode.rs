use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::chunk::{Chunk, IDAT, IEND, IHDR};
use crate::header::ImageHeader;
use crate::pixels::PixelBuffer;
use crate::{PngError, FILTER_NONE, PNG_SIGNATURE};

/// Framing details of one chunk, as found in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSummary {
    pub tag: [u8; 4],
    pub length: u32,
    pub crc: u32,
}

impl ChunkSummary {
    pub fn tag_name(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

impl From<&Chunk> for ChunkSummary {
    fn from(chunk: &Chunk) -> Self {
        Self {
            tag: chunk.tag,
            length: chunk.length,
            crc: chunk.crc,
        }
    }
}

/// A fully checked PNG produced by [`crate::encode`]
#[derive(Debug, Clone)]
pub struct DecodedPng {
    pub header: ImageHeader,
    pub chunks: Vec<ChunkSummary>,
    pub pixels: PixelBuffer,
}

/// Split a PNG stream into chunks, up to and including IEND.
///
/// Every chunk's CRC is verified. Bytes after IEND are ignored.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk>, PngError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(PngError::InvalidSignature);
    }

    let mut chunks = Vec::new();
    let mut offset = PNG_SIGNATURE.len();

    loop {
        let (chunk, used) = Chunk::from_bytes(&bytes[offset..])?;
        offset += used;
        let is_end = chunk.tag == IEND;
        chunks.push(chunk);
        if is_end {
            return Ok(chunks);
        }
        if offset == bytes.len() {
            return Err(PngError::MissingChunk("IEND"));
        }
    }
}

/// Inflate a zlib stream
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>, PngError> {
    let mut raw = Vec::new();
    ZlibDecoder::new(compressed).read_to_end(&mut raw)?;
    Ok(raw)
}

/// Inflate at most `limit` bytes; anything beyond is left unread
fn inflate_limited(compressed: &[u8], limit: usize) -> Result<Vec<u8>, PngError> {
    let mut raw = Vec::new();
    ZlibDecoder::new(compressed)
        .take(limit as u64)
        .read_to_end(&mut raw)?;
    Ok(raw)
}

/// Decode a PNG stream written by this crate back into pixels.
///
/// IHDR must come first, at least one IDAT must follow, and only
/// ancillary chunks may appear besides IHDR/IDAT/IEND. Each inflated
/// scanline must carry filter type "None".
pub fn decode(bytes: &[u8]) -> Result<DecodedPng, PngError> {
    let chunks = read_chunks(bytes)?;

    let first = chunks.first().ok_or(PngError::MissingChunk("IHDR"))?;
    if first.tag != IHDR {
        return Err(PngError::UnexpectedChunk(first.tag_name()));
    }
    let header = ImageHeader::from_bytes(&first.data)?;

    let mut compressed = Vec::new();
    let mut seen_idat = false;
    for chunk in &chunks[1..] {
        match chunk.tag {
            IDAT => {
                compressed.extend_from_slice(&chunk.data);
                seen_idat = true;
            }
            IEND => {}
            _ if !chunk.is_critical() => {}
            _ => return Err(PngError::UnexpectedChunk(chunk.tag_name())),
        }
    }
    if !seen_idat {
        return Err(PngError::MissingChunk("IDAT"));
    }

    // One byte past the expected size is enough to detect oversized data
    let raw = inflate_limited(&compressed, header.raw_data_len().saturating_add(1))?;
    if raw.len() != header.raw_data_len() {
        return Err(PngError::ScanlineLength {
            expected: header.raw_data_len(),
            actual: raw.len(),
        });
    }

    let mut data = Vec::with_capacity(raw.len() - header.height as usize);
    for (row, line) in raw.chunks_exact(header.scanline_len()).enumerate() {
        if line[0] != FILTER_NONE {
            return Err(PngError::UnsupportedFilter {
                row: row as u32,
                filter: line[0],
            });
        }
        data.extend_from_slice(&line[1..]);
    }

    Ok(DecodedPng {
        header,
        chunks: chunks.iter().map(ChunkSummary::from).collect(),
        pixels: PixelBuffer::from_raw(header.width, header.height, data)?,
    })
}
