//! BMP v3 header record and layout constants.
//!
//! Encoding and decoding go through [`crate::encode_bmp`],
//! [`crate::decode_bmp`] and the request builders.

mod decode;
mod encode;
mod header;

pub use header::{
    BitmapHeader, FILE_HEADER_SIZE, HEADER_SIZE, INFO_HEADER_SIZE, PALETTE_BYTES, PALETTE_ENTRIES,
};

use crate::bitmap::EncodedBitmap;
use crate::decode::DecodeOutput;
use crate::encode::ImageSizeField;
use crate::error::BitmapError;
use crate::image::PixelImage;
use crate::limits::Limits;
use enough::Stop;

/// Decode BMP data (native BGR order, packed top-down rows).
pub(crate) fn decode<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, BitmapError> {
    decode::decode_bmp(data, limits, stop)
}

/// Encode a frame to BMP.
pub(crate) fn encode(
    image: &PixelImage<'_>,
    size_field: ImageSizeField,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<EncodedBitmap, BitmapError> {
    encode::encode_bmp(image, size_field, limits, stop)
}
