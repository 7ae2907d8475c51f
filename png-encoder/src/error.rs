use thiserror::Error;

#[derive(Debug, Error)]
pub enum PngError {
    #[error("invalid image dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image {width}x{height} is too large to encode")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("chunk data of {0} bytes exceeds the PNG chunk length limit")]
    ChunkTooLarge(usize),

    #[error("missing PNG signature")]
    InvalidSignature,

    #[error("truncated stream: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("CRC mismatch in {tag} chunk: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    CrcMismatch {
        tag: String,
        stored: u32,
        computed: u32,
    },

    #[error("unexpected {0} chunk")]
    UnexpectedChunk(String),

    #[error("missing {0} chunk")]
    MissingChunk(&'static str),

    #[error("invalid IHDR: {0}")]
    InvalidHeader(&'static str),

    #[error("decompressed image data is {actual} bytes, expected {expected}")]
    ScanlineLength { expected: usize, actual: usize },

    #[error("unsupported filter type {filter} on row {row}")]
    UnsupportedFilter { row: u32, filter: u8 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
