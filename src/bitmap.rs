use alloc::vec::Vec;

use crate::bmp::BitmapHeader;
use crate::error::BitmapError;
use crate::pixel::ChannelLayout;

/// A complete BMP file image produced by the encoder.
///
/// The caller owns the buffer. It is freed by exactly one successful
/// [`release`](EncodedBitmap::release), or on drop if never released.
/// Releasing twice is a no-op that returns `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedBitmap {
    bytes: Option<Vec<u8>>,
    layout: ChannelLayout,
}

impl EncodedBitmap {
    pub(crate) fn new(bytes: Vec<u8>, layout: ChannelLayout) -> Self {
        Self {
            bytes: Some(bytes),
            layout,
        }
    }

    /// The file bytes, or `None` once released.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Total file size in bytes (0 once released).
    pub fn len(&self) -> usize {
        self.bytes.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_released(&self) -> bool {
        self.bytes.is_none()
    }

    /// Layout of the stored pixels. `Rgb24` input is reported as `Bgr24`,
    /// since BMP stores channels in B,G,R order.
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Parse this bitmap's own header.
    pub fn header(&self) -> Result<BitmapHeader, BitmapError> {
        let bytes = self.bytes().ok_or(BitmapError::UnexpectedEof)?;
        BitmapHeader::parse(bytes)
    }

    /// Free the file buffer. Returns `true` if a non-empty buffer was freed,
    /// `false` if it was already released or empty.
    ///
    /// An empty bitmap is still released by this call: the return value is
    /// `false`, but [`is_released`](Self::is_released) is `true` afterwards.
    pub fn release(&mut self) -> bool {
        match self.bytes.take() {
            Some(bytes) if !bytes.is_empty() => true,
            Some(_) | None => false,
        }
    }

    /// Take ownership of the file bytes, or `None` once released.
    pub fn into_bytes(mut self) -> Option<Vec<u8>> {
        self.bytes.take()
    }
}

/// Free a bitmap's file buffer; see [`EncodedBitmap::release`].
pub fn release(bitmap: &mut EncodedBitmap) -> bool {
    bitmap.release()
}
