//! BMP v3 file header (14 bytes) and BITMAPINFOHEADER (40 bytes) as one
//! structured record, packed and parsed little-endian regardless of host
//! byte order.

use alloc::vec::Vec;

use crate::error::BitmapError;

/// Size of the BITMAPFILEHEADER.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER (BMP v3).
pub const INFO_HEADER_SIZE: usize = 40;
/// Combined header size; the palette (if any) starts here.
pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// Number of entries in the 8-bit grayscale palette.
pub const PALETTE_ENTRIES: usize = 256;
/// Palette size in bytes (B, G, R, reserved per entry).
pub const PALETTE_BYTES: usize = PALETTE_ENTRIES * 4;

const MAGIC: &[u8; 2] = b"BM";
const ROW_ALIGNMENT: usize = 4;

/// Zero bytes appended to a row of `raw_row_bytes` to reach a 4-byte boundary.
pub(crate) fn pad_bytes(raw_row_bytes: usize) -> usize {
    (ROW_ALIGNMENT - raw_row_bytes % ROW_ALIGNMENT) % ROW_ALIGNMENT
}

/// The 54-byte header at the start of every BMP v3 file.
///
/// Field order and widths follow the on-disk layout; see
/// [`BitmapHeader::write_le`] for offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    /// Total file size in bytes.
    pub file_size: u32,
    /// Offset from the start of the file to the pixel data.
    pub pixel_data_offset: u32,
    pub width: i32,
    /// Negative for top-down row order.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    /// 0 = uncompressed (BI_RGB).
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BitmapHeader {
    /// Append the header to `out`.
    ///
    /// | Offset | Size | Field             |
    /// |--------|------|-------------------|
    /// | 0      | 2    | `"BM"`            |
    /// | 2      | 4    | file size         |
    /// | 6      | 4    | reserved (0)      |
    /// | 10     | 4    | pixel data offset |
    /// | 14     | 4    | info header size  |
    /// | 18     | 4    | width             |
    /// | 22     | 4    | height            |
    /// | 26     | 2    | planes            |
    /// | 28     | 2    | bits per pixel    |
    /// | 30     | 4    | compression       |
    /// | 34     | 4    | image size        |
    /// | 38     | 4    | X pixels/meter    |
    /// | 42     | 4    | Y pixels/meter    |
    /// | 46     | 4    | colors used       |
    /// | 50     | 4    | important colors  |
    pub fn write_le(&self, out: &mut Vec<u8>) {
        // File header (14 bytes)
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&self.pixel_data_offset.to_le_bytes());

        // BITMAPINFOHEADER (40 bytes)
        out.extend_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_important.to_le_bytes());
    }

    /// Parse the first 54 bytes of a BMP file.
    ///
    /// Only the magic and the info header size are validated here; field
    /// semantics are left to the decoder.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        if data.len() >= 2 && &data[..2] != MAGIC {
            return Err(BitmapError::UnrecognizedFormat);
        }
        let mut r = Reader::new(data);
        r.skip(2)?;
        let file_size = r.u32()?;
        r.skip(4)?;
        let pixel_data_offset = r.u32()?;

        let info_size = r.u32()?;
        if info_size as usize != INFO_HEADER_SIZE {
            return Err(BitmapError::UnsupportedVariant(alloc::format!(
                "info header size {info_size} (only the 40-byte BITMAPINFOHEADER is supported)"
            )));
        }

        let header = Self {
            file_size,
            pixel_data_offset,
            width: r.i32()?,
            height: r.i32()?,
            planes: r.u16()?,
            bits_per_pixel: r.u16()?,
            compression: r.u32()?,
            image_size: r.u32()?,
            x_pixels_per_meter: r.i32()?,
            y_pixels_per_meter: r.i32()?,
            colors_used: r.u32()?,
            colors_important: r.u32()?,
        };
        log::trace!("parsed BMP header: {header:?}");
        Ok(header)
    }

    /// Whether rows are stored top-to-bottom (negative height).
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Image height in rows, regardless of row order.
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Number of palette entries following the header.
    ///
    /// An 8-bit image with `colors_used == 0` carries the full 256 entries.
    pub fn palette_len(&self) -> usize {
        match (self.bits_per_pixel, self.colors_used) {
            (8, 0) => PALETTE_ENTRIES,
            (_, n) => n as usize,
        }
    }

    /// Stored row length in bytes, including padding.
    pub fn row_stride(&self) -> Option<usize> {
        let width = usize::try_from(self.width).ok()?;
        let raw = width.checked_mul(usize::from(self.bits_per_pixel / 8))?;
        raw.checked_add(pad_bytes(raw))
    }
}

/// Little-endian reader over a byte slice.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let end = self.pos.checked_add(N).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = end;
        Ok(())
    }

    fn u16(&mut self) -> Result<u16, BitmapError> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn u32(&mut self) -> Result<u32, BitmapError> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    fn i32(&mut self) -> Result<i32, BitmapError> {
        self.take::<4>().map(i32::from_le_bytes)
    }
}
