use bytes::{BufMut, BytesMut};

use crate::{PngError, CRC32, PNG_MAX_U31};

/// Image header chunk tag
pub const IHDR: [u8; 4] = *b"IHDR";
/// Image data chunk tag
pub const IDAT: [u8; 4] = *b"IDAT";
/// End-of-stream chunk tag
pub const IEND: [u8; 4] = *b"IEND";

/// Length, tag and CRC framing around each chunk's data
const FRAMING_LEN: usize = 12;

/// One PNG chunk: `length || tag || data || crc`, integers big-endian
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Data length
    pub length: u32,
    /// Four ASCII letters naming the chunk
    pub tag: [u8; 4],
    /// Chunk payload
    pub data: Vec<u8>,
    /// CRC-32 over tag and data
    pub crc: u32,
}

impl Chunk {
    /// Create a new chunk with its CRC filled in
    pub fn new(tag: [u8; 4], data: Vec<u8>) -> Result<Self, PngError> {
        if data.len() > PNG_MAX_U31 as usize {
            return Err(PngError::ChunkTooLarge(data.len()));
        }

        let mut chunk = Self {
            length: data.len() as u32,
            tag,
            data,
            crc: 0,
        };
        chunk.crc = chunk.calculate_crc();
        Ok(chunk)
    }

    /// CRC-32 of the tag followed by the data; the length is not covered
    pub fn calculate_crc(&self) -> u32 {
        let mut digest = CRC32.digest();
        digest.update(&self.tag);
        digest.update(&self.data);
        digest.finalize()
    }

    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }

    /// Lowercase first letter marks an ancillary chunk a reader may skip
    pub fn is_critical(&self) -> bool {
        self.tag[0].is_ascii_uppercase()
    }

    pub fn tag_name(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }

    /// Size of the chunk on the wire
    pub fn encoded_len(&self) -> usize {
        FRAMING_LEN + self.data.len()
    }

    pub fn write_to(&self, out: &mut BytesMut) {
        out.reserve(self.encoded_len());
        out.put_u32(self.length);
        out.put_slice(&self.tag);
        out.put_slice(&self.data);
        out.put_u32(self.crc);
    }

    /// Serialize chunk to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = BytesMut::with_capacity(self.encoded_len());
        self.write_to(&mut out);
        out.to_vec()
    }

    /// Parse one chunk from the front of `bytes`.
    ///
    /// Returns the chunk and the number of bytes it occupied.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), PngError> {
        if bytes.len() < FRAMING_LEN {
            return Err(PngError::Truncated {
                needed: FRAMING_LEN,
                available: bytes.len(),
            });
        }

        let length = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if length > PNG_MAX_U31 {
            return Err(PngError::ChunkTooLarge(length as usize));
        }
        let tag = [bytes[4], bytes[5], bytes[6], bytes[7]];

        let total = FRAMING_LEN + length as usize;
        if bytes.len() < total {
            return Err(PngError::Truncated {
                needed: total,
                available: bytes.len(),
            });
        }

        let data_end = 8 + length as usize;
        let data = bytes[8..data_end].to_vec();
        let crc = u32::from_be_bytes([
            bytes[data_end],
            bytes[data_end + 1],
            bytes[data_end + 2],
            bytes[data_end + 3],
        ]);

        let chunk = Self {
            length,
            tag,
            data,
            crc,
        };

        if !chunk.verify_crc() {
            return Err(PngError::CrcMismatch {
                tag: chunk.tag_name(),
                stored: chunk.crc,
                computed: chunk.calculate_crc(),
            });
        }

        Ok((chunk, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iend_has_well_known_crc() {
        let chunk = Chunk::new(IEND, Vec::new()).unwrap();
        assert_eq!(chunk.crc, 0xAE42_6082);
        assert_eq!(
            chunk.to_bytes(),
            vec![0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn test_chunk_layout_is_big_endian() {
        let chunk = Chunk::new(IDAT, vec![0xAA; 300]).unwrap();
        let bytes = chunk.to_bytes();

        assert_eq!(bytes.len(), 312);
        assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x01, 0x2C]);
        assert_eq!(&bytes[4..8], b"IDAT");
        assert_eq!(&bytes[308..], &chunk.crc.to_be_bytes());
    }

    #[test]
    fn test_chunk_parse_reports_consumed_length() {
        let mut stream = Chunk::new(IHDR, vec![1, 2, 3]).unwrap().to_bytes();
        stream.extend_from_slice(&Chunk::new(IEND, Vec::new()).unwrap().to_bytes());

        let (first, used) = Chunk::from_bytes(&stream).unwrap();
        assert_eq!(first.tag, IHDR);
        assert_eq!(first.data, vec![1, 2, 3]);
        assert_eq!(used, 15);

        let (second, _) = Chunk::from_bytes(&stream[used..]).unwrap();
        assert_eq!(second.tag, IEND);
    }

    #[test]
    fn test_corrupted_crc_is_rejected() {
        let mut bytes = Chunk::new(IDAT, vec![9, 9, 9]).unwrap().to_bytes();
        bytes[9] ^= 0xFF;

        match Chunk::from_bytes(&bytes) {
            Err(PngError::CrcMismatch { tag, .. }) => assert_eq!(tag, "IDAT"),
            other => panic!("expected CRC mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_chunk() {
        let bytes = Chunk::new(IDAT, vec![0; 16]).unwrap().to_bytes();
        assert!(matches!(
            Chunk::from_bytes(&bytes[..20]),
            Err(PngError::Truncated { needed: 28, available: 20 })
        ));
    }

    #[test]
    fn test_ancillary_chunks_are_not_critical() {
        assert!(Chunk::new(IHDR, Vec::new()).unwrap().is_critical());
        assert!(!Chunk::new(*b"tEXt", Vec::new()).unwrap().is_critical());
    }
}
