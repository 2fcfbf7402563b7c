//! BMP v3 reader for the files this crate writes: uncompressed 8-bit
//! grayscale-palette and 24-bit images, top-down or bottom-up.
//!
//! Output keeps BMP's native channel order (`Bgr24`) and strips row padding.

use alloc::vec::Vec;
use enough::Stop;

use super::header::{BitmapHeader, HEADER_SIZE, PALETTE_ENTRIES};
use crate::decode::DecodeOutput;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::ChannelLayout;

/// Grayscale lookup built from an 8-bit palette.
struct GrayPalette {
    lut: [u8; PALETTE_ENTRIES],
    len: usize,
}

impl GrayPalette {
    fn read(data: &[u8], entries: usize) -> Result<Self, BitmapError> {
        if entries > PALETTE_ENTRIES {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "{entries} palette entries for an 8-bit image"
            )));
        }
        let bytes = data
            .get(HEADER_SIZE..HEADER_SIZE + entries * 4)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut lut = [0u8; PALETTE_ENTRIES];
        for (i, entry) in bytes.chunks_exact(4).enumerate() {
            let (b, g, r) = (entry[0], entry[1], entry[2]);
            if b != g || g != r {
                return Err(BitmapError::UnsupportedVariant(alloc::format!(
                    "non-grayscale palette entry {i}: ({r}, {g}, {b})"
                )));
            }
            lut[i] = b;
        }
        Ok(Self { lut, len: entries })
    }

    /// Whether index `i` maps to gray level `i` for every possible index.
    fn is_identity(&self) -> bool {
        self.len == PALETTE_ENTRIES
            && self
                .lut
                .iter()
                .enumerate()
                .all(|(i, &v)| usize::from(v) == i)
    }

    fn map(&self, index: u8) -> Result<u8, BitmapError> {
        if usize::from(index) >= self.len {
            return Err(BitmapError::InvalidData(alloc::format!(
                "palette index {index} out of range ({} entries)",
                self.len
            )));
        }
        Ok(self.lut[usize::from(index)])
    }
}

/// Decode a BMP file to packed, top-down pixels.
pub(crate) fn decode_bmp<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, BitmapError> {
    let header = BitmapHeader::parse(data)?;

    if header.planes != 1 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "planes must be 1, got {}",
            header.planes
        )));
    }
    if header.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "compression type {} (only uncompressed BI_RGB is supported)",
            header.compression
        )));
    }
    let layout = match header.bits_per_pixel {
        8 => ChannelLayout::Mono8,
        24 => ChannelLayout::Bgr24,
        other => {
            return Err(BitmapError::UnsupportedVariant(alloc::format!(
                "{other} bits per pixel (only 8 and 24 are supported)"
            )));
        }
    };
    if header.width <= 0 || header.height == 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "invalid dimensions {}x{}",
            header.width,
            header.height
        )));
    }

    let width = header.width as u32;
    let height = header.abs_height();
    let too_large = || BitmapError::DimensionsTooLarge { width, height };
    let w = width as usize;
    let h = height as usize;
    let raw_row = w.checked_mul(layout.channels()).ok_or_else(too_large)?;
    let out_bytes = raw_row.checked_mul(h).ok_or_else(too_large)?;
    Limits::check_frame(limits, width, height, out_bytes)?;

    let palette = match layout {
        ChannelLayout::Mono8 => Some(GrayPalette::read(data, header.palette_len())?),
        _ => None,
    };
    let palette_bytes = palette.as_ref().map_or(0, |p| p.len * 4);

    let offset = header.pixel_data_offset as usize;
    if offset < HEADER_SIZE + palette_bytes {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "pixel data offset {offset} overlaps header and palette"
        )));
    }
    let stride = header.row_stride().ok_or_else(too_large)?;
    let section_len = stride.checked_mul(h).ok_or_else(too_large)?;
    let section = offset
        .checked_add(section_len)
        .and_then(|end| data.get(offset..end))
        .ok_or(BitmapError::UnexpectedEof)?;

    stop.check()?;

    let identity = palette.as_ref().is_none_or(GrayPalette::is_identity);
    if header.is_top_down() && stride == raw_row && identity {
        return Ok(DecodeOutput::borrowed(section, width, height, layout));
    }

    let mut out = Vec::new();
    out.try_reserve_exact(out_bytes)
        .map_err(|_| BitmapError::AllocationFailed { bytes: out_bytes })?;
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let src_y = if header.is_top_down() { y } else { h - 1 - y };
        let row = &section[src_y * stride..src_y * stride + raw_row];
        match &palette {
            Some(palette) if !identity => {
                for &index in row {
                    out.push(palette.map(index)?);
                }
            }
            _ => out.extend_from_slice(row),
        }
    }

    Ok(DecodeOutput::owned(out, width, height, layout))
}
