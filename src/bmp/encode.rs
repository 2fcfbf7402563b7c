//! BMP encoder: uncompressed top-down BMP v3, 8-bit grayscale (with a
//! 256-entry ramp palette) or 24-bit BGR.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{BitmapHeader, HEADER_SIZE, PALETTE_BYTES, PALETTE_ENTRIES, pad_bytes};
use crate::bitmap::EncodedBitmap;
use crate::encode::ImageSizeField;
use crate::error::BitmapError;
use crate::image::PixelImage;
use crate::limits::Limits;
use crate::pixel::ChannelLayout;

/// Sizes derived from an image before anything is allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpGeometry {
    pub channels: usize,
    pub raw_row_bytes: usize,
    pub pad_bytes: usize,
    pub palette_bytes: usize,
    pub pixel_data_offset: usize,
    pub file_size: usize,
}

impl BmpGeometry {
    pub(crate) fn for_image(image: &PixelImage<'_>) -> Result<Self, BitmapError> {
        let layout = image.layout;
        let channels = layout
            .bmp_channels()
            .ok_or(BitmapError::UnsupportedLayout(layout))?;
        let too_large = BitmapError::DimensionsTooLarge {
            width: image.width,
            height: image.height,
        };

        let raw_row_bytes = (image.width as usize)
            .checked_mul(channels)
            .ok_or(too_large)?;
        let pad_bytes = pad_bytes(raw_row_bytes);
        let palette_bytes = if channels == 1 { PALETTE_BYTES } else { 0 };
        let pixel_data_offset = HEADER_SIZE + palette_bytes;
        let file_size = pad_bytes
            .checked_mul(image.height as usize)
            .and_then(|p| p.checked_add(image.buffer_size()))
            .and_then(|p| p.checked_add(pixel_data_offset))
            .filter(|&total| u32::try_from(total).is_ok())
            .ok_or(BitmapError::DimensionsTooLarge {
                width: image.width,
                height: image.height,
            })?;

        Ok(Self {
            channels,
            raw_row_bytes,
            pad_bytes,
            palette_bytes,
            pixel_data_offset,
            file_size,
        })
    }

    fn header(
        &self,
        image: &PixelImage<'_>,
        size_field: ImageSizeField,
    ) -> Result<BitmapHeader, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: image.width,
            height: image.height,
        };
        let width = i32::try_from(image.width).map_err(|_| too_large())?;
        let height = i32::try_from(image.height).map_err(|_| too_large())?;
        let image_size = match size_field {
            ImageSizeField::SourceBytes => image.buffer_size(),
            ImageSizeField::PaddedBytes => self.file_size - self.pixel_data_offset,
        };
        let palette_entries = if self.palette_bytes > 0 {
            PALETTE_ENTRIES as u32
        } else {
            0
        };

        // file_size was checked to fit in u32, and every other size is smaller.
        Ok(BitmapHeader {
            file_size: self.file_size as u32,
            pixel_data_offset: self.pixel_data_offset as u32,
            width,
            height: -height, // negative = top-down
            planes: 1,
            bits_per_pixel: (8 * self.channels) as u16,
            compression: 0,
            image_size: image_size as u32,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: palette_entries,
            colors_important: palette_entries,
        })
    }
}

/// Encode a frame to a BMP file image.
pub(crate) fn encode_bmp(
    image: &PixelImage<'_>,
    size_field: ImageSizeField,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<EncodedBitmap, BitmapError> {
    image.validate()?;
    let geom = BmpGeometry::for_image(image)?;
    let header = geom.header(image, size_field)?;
    Limits::check_frame(limits, image.width, image.height, geom.file_size)?;

    stop.check()?;

    let mut out = Vec::new();
    out.try_reserve_exact(geom.file_size)
        .map_err(|_| BitmapError::AllocationFailed {
            bytes: geom.file_size,
        })?;

    header.write_le(&mut out);
    if geom.palette_bytes > 0 {
        write_gray_palette(&mut out);
    }

    let pixels = image.data();
    let layout = match image.layout {
        ChannelLayout::Rgb24 => {
            for (row_idx, row) in pixels.chunks_exact(geom.raw_row_bytes).enumerate() {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                // RGB→BGR: BMP stores channels blue first
                for px in row.chunks_exact(3) {
                    out.extend_from_slice(&[px[2], px[1], px[0]]);
                }
                out.extend(core::iter::repeat_n(0u8, geom.pad_bytes));
            }
            ChannelLayout::Bgr24
        }
        native if geom.pad_bytes == 0 => {
            // Rows already aligned: the whole frame is the pixel section
            out.extend_from_slice(pixels);
            native
        }
        native => {
            for (row_idx, row) in pixels.chunks_exact(geom.raw_row_bytes).enumerate() {
                if row_idx % 16 == 0 {
                    stop.check()?;
                }
                out.extend_from_slice(row);
                out.extend(core::iter::repeat_n(0u8, geom.pad_bytes));
            }
            native
        }
    };

    debug_assert_eq!(out.len(), geom.file_size);
    log::debug!(
        "encoded {}x{} {:?} frame as {}-bit BMP ({} bytes, {} pad bytes/row)",
        image.width,
        image.height,
        image.layout,
        header.bits_per_pixel,
        out.len(),
        geom.pad_bytes,
    );

    Ok(EncodedBitmap::new(out, layout))
}

/// Linear grayscale ramp: entry `i` is (B, G, R, 0) = (i, i, i, 0).
fn write_gray_palette(out: &mut Vec<u8>) {
    for i in 0..=u8::MAX {
        out.extend_from_slice(&[i, i, i, 0]);
    }
}
