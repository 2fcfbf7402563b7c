//! # framebmp
//!
//! Encode raw camera frames into uncompressed Windows bitmap (BMP v3) files.
//!
//! A frame is a packed, top-down pixel buffer in one of the camera layouts
//! ([`ChannelLayout`]). Encoding produces a complete file image:
//!
//! - 14-byte file header + 40-byte BITMAPINFOHEADER, little-endian
//! - a 256-entry grayscale ramp palette for `Mono8` frames
//! - pixel rows padded to 4 bytes, stored top-down (negative height)
//! - `Rgb24` frames swizzled to BMP's B,G,R order
//!
//! The result is an [`EncodedBitmap`] owned by the caller, who releases it
//! once (explicitly with [`release`], or by dropping it) and may write it to
//! disk with [`write_to_file`] (`std` feature).
//!
//! ## Non-Goals
//!
//! - Compressed BMP (RLE, bitfields)
//! - Bit depths other than 8-bit grayscale and 24-bit color
//! - 16-bit grayscale frames (`Mono16` is rejected, not down-converted)
//!
//! ## Usage
//!
//! ```no_run
//! use framebmp::{ChannelLayout, PixelImage, Unstoppable};
//!
//! let frame = vec![0u8; 640 * 480]; // from the camera
//! let image = PixelImage::new(&frame, 640, 480, ChannelLayout::Mono8);
//!
//! let mut bmp = framebmp::encode_bmp(&image, Unstoppable)?;
//! # #[cfg(feature = "std")]
//! framebmp::write_to_file(&bmp, "frame.bmp")?;
//! assert!(framebmp::release(&mut bmp));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod encode;

#[cfg(feature = "std")]
mod sink;

// Re-exports
pub use bitmap::{EncodedBitmap, release};
pub use bmp::BitmapHeader;
pub use decode::{DecodeOutput, DecodeRequest};
pub use encode::{EncodeRequest, ImageSizeField};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use image::PixelImage;
pub use limits::Limits;
pub use pixel::ChannelLayout;
#[cfg(feature = "std")]
pub use sink::{SinkError, write_to, write_to_file};

/// Encode a frame to BMP with default settings.
pub fn encode_bmp(image: &PixelImage<'_>, stop: impl Stop) -> Result<EncodedBitmap, BitmapError> {
    EncodeRequest::new().encode(image, stop)
}

/// Decode a BMP v3 file (8-bit grayscale or 24-bit) to packed top-down pixels.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}
