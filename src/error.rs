use alloc::string::String;
use enough::StopReason;

use crate::pixel::ChannelLayout;

/// Errors from BMP encoding and decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("invalid image: width, height and buffer size must all be non-zero")]
    InvalidImage,

    #[error("could not allocate {bytes} bytes for the bitmap")]
    AllocationFailed { bytes: usize },

    #[error("channel layout {0:?} cannot be stored as BMP")]
    UnsupportedLayout(ChannelLayout),

    #[error("unknown channel layout code {0:#x}")]
    UnknownLayoutCode(u32),

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
