use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::ComponentBytes as _;

use crate::error::BitmapError;
use crate::pixel::ChannelLayout;

/// A raw camera frame: `height` rows of `width * bytes_per_pixel` bytes,
/// packed (no row padding), top-to-bottom, left-to-right.
///
/// The buffer is borrowed when constructed from a slice and owned when
/// constructed from a `Vec` (or when a strided source had to be packed).
#[derive(Clone, Debug)]
pub struct PixelImage<'a> {
    data: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
}

impl<'a> PixelImage<'a> {
    /// Wrap a borrowed frame buffer.
    pub fn new(data: &'a [u8], width: u32, height: u32, layout: ChannelLayout) -> Self {
        Self {
            data: Cow::Borrowed(data),
            width,
            height,
            layout,
        }
    }

    /// Wrap an owned frame buffer.
    pub fn from_vec(
        data: Vec<u8>,
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> PixelImage<'static> {
        PixelImage {
            data: Cow::Owned(data),
            width,
            height,
            layout,
        }
    }

    /// View typed RGB pixels as an `Rgb24` frame (zero-copy).
    #[cfg(feature = "rgb")]
    pub fn from_rgb8(pixels: &'a [rgb::RGB8], width: u32, height: u32) -> Self {
        Self::new(pixels.as_bytes(), width, height, ChannelLayout::Rgb24)
    }

    /// View typed BGR pixels as a `Bgr24` frame (zero-copy).
    #[cfg(feature = "rgb")]
    pub fn from_bgr8(pixels: &'a [rgb::alt::BGR8], width: u32, height: u32) -> Self {
        Self::new(pixels.as_bytes(), width, height, ChannelLayout::Bgr24)
    }

    /// Build an `Rgb24` frame from an [`imgref::ImgRef`].
    ///
    /// Borrows when the image is tightly packed (stride == width),
    /// otherwise copies the rows into a packed buffer.
    #[cfg(feature = "imgref")]
    pub fn from_imgref_rgb8(img: imgref::ImgRef<'a, rgb::RGB8>) -> Result<Self, BitmapError> {
        let (width, height) = packed_dims(img.width(), img.height())?;
        let packed_len = img.width() * img.height();
        let buf: &'a [rgb::RGB8] = img.into_buf();
        if img.stride() == img.width() && buf.len() >= packed_len {
            return Ok(Self::from_rgb8(&buf[..packed_len], width, height));
        }
        let mut data = Vec::with_capacity(packed_len * 3);
        for row in img.rows() {
            data.extend_from_slice(row.as_bytes());
        }
        Ok(PixelImage {
            data: Cow::Owned(data),
            width,
            height,
            layout: ChannelLayout::Rgb24,
        })
    }

    /// The raw frame bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the frame buffer in bytes.
    pub fn buffer_size(&self) -> usize {
        self.data.len()
    }

    /// Whether the frame buffer is borrowed from the caller.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }

    /// Byte length implied by dimensions and layout, or `None` on overflow.
    pub fn expected_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.layout.bytes_per_pixel())
    }

    /// Reject zero dimensions, an empty buffer, or a buffer whose size
    /// disagrees with the dimensions.
    pub(crate) fn validate(&self) -> Result<(), BitmapError> {
        if self.width == 0 || self.height == 0 || self.data.is_empty() {
            return Err(BitmapError::InvalidImage);
        }
        let expected = self.expected_len().ok_or(BitmapError::DimensionsTooLarge {
            width: self.width,
            height: self.height,
        })?;
        if self.data.len() != expected {
            return Err(BitmapError::BufferSizeMismatch {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Convert in-memory dimensions to frame dimensions. A dimension that does
/// not fit in `u32` is reported saturated; the other one is reported as is.
#[cfg(feature = "imgref")]
fn packed_dims(width: usize, height: usize) -> Result<(u32, u32), BitmapError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        (w, h) => Err(BitmapError::DimensionsTooLarge {
            width: w.unwrap_or(u32::MAX),
            height: h.unwrap_or(u32::MAX),
        }),
    }
}
