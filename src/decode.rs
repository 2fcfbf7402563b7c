use alloc::borrow::Cow;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::BitmapError;
use crate::image::PixelImage;
use crate::limits::Limits;
use crate::pixel::ChannelLayout;

/// Decoded BMP pixels: packed, top-down rows in native BMP channel order
/// (`Mono8` or `Bgr24`). Borrowed when the file's pixel section already has
/// that shape, owned otherwise.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// View the pixels as a frame, ready to be encoded again.
    pub fn as_image(&self) -> PixelImage<'_> {
        PixelImage::new(self.pixels(), self.width, self.height, self.layout)
    }

    pub(crate) fn borrowed(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            layout,
        }
    }

    pub(crate) fn owned(data: Vec<u8>, width: u32, height: u32, layout: ChannelLayout) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            layout,
        }
    }
}

/// Builder for BMP decoding.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(&self, stop: impl Stop) -> Result<DecodeOutput<'a>, BitmapError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}
