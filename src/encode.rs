use enough::Stop;

use crate::bitmap::EncodedBitmap;
use crate::error::BitmapError;
use crate::image::PixelImage;
use crate::limits::Limits;

/// What to store in the info header's image size field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageSizeField {
    /// The unpadded source buffer size. Byte-compatible with the legacy
    /// camera-frame writer; most readers ignore this field for BI_RGB.
    #[default]
    SourceBytes,
    /// The padded size of the pixel section as stored on disk.
    PaddedBytes,
}

/// Builder for BMP encoding.
///
/// ```
/// use framebmp::{ChannelLayout, EncodeRequest, PixelImage, Unstoppable};
///
/// let frame = [10u8, 20, 30];
/// let image = PixelImage::new(&frame, 1, 1, ChannelLayout::Rgb24);
/// let bmp = EncodeRequest::new().encode(&image, Unstoppable)?;
/// assert_eq!(bmp.layout(), ChannelLayout::Bgr24);
/// assert_eq!(&bmp.bytes().unwrap()[54..57], &[30, 20, 10]);
/// # Ok::<(), framebmp::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
    size_field: ImageSizeField,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject frames whose dimensions or encoded size exceed `limits`.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_image_size_field(mut self, size_field: ImageSizeField) -> Self {
        self.size_field = size_field;
        self
    }

    /// Encode `image` into an owned BMP file image.
    pub fn encode(
        &self,
        image: &PixelImage<'_>,
        stop: impl Stop,
    ) -> Result<EncodedBitmap, BitmapError> {
        crate::bmp::encode(image, self.size_field, self.limits, &stop)
    }
}
