//! Test corpus: encode/decode across patterns, sizes and layouts, plus
//! hand-built files the encoder never produces (bottom-up, odd palettes).

use enough::Unstoppable;
use framebmp::*;

fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            if (x + y) % 2 == 0 {
                for c in 0..bpp {
                    pixels[off + c] = 200 + (c as u8 * 20);
                }
            } else {
                for c in 0..bpp {
                    pixels[off + c] = 10 + (c as u8 * 30);
                }
            }
        }
    }
    pixels
}

fn noise_pattern(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

fn swap_rb(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(3)
        .flat_map(|px| [px[2], px[1], px[0]])
        .collect()
}

fn expected_file_size(w: usize, h: usize, layout: ChannelLayout) -> usize {
    let channels = layout.channels();
    let raw_row = w * channels;
    let pad = (4 - raw_row % 4) % 4;
    let palette = if channels == 1 { 1024 } else { 0 };
    54 + palette + raw_row * h + pad * h
}

// ── Size formula ────────────────────────────────────────────────────

#[test]
fn file_size_matches_formula_for_every_row_alignment() {
    for layout in [ChannelLayout::Mono8, ChannelLayout::Rgb24, ChannelLayout::Bgr24] {
        for w in 1..=8usize {
            let h = 3;
            let pixels = noise_pattern(w, h, layout.bytes_per_pixel());
            let image = PixelImage::new(&pixels, w as u32, h as u32, layout);
            let bmp = encode_bmp(&image, Unstoppable).unwrap();
            assert_eq!(
                bmp.len(),
                expected_file_size(w, h, layout),
                "{layout:?} width {w}"
            );
            let header = bmp.header().unwrap();
            assert_eq!(header.file_size as usize, bmp.len());
            assert_eq!(header.image_size as usize, pixels.len());
        }
    }
}

#[test]
fn padding_bytes_are_zero() {
    // width 5 RGB: 15-byte rows, 1 pad byte each
    let pixels = vec![0xFFu8; 5 * 4 * 3];
    let image = PixelImage::new(&pixels, 5, 4, ChannelLayout::Rgb24);
    let bmp = encode_bmp(&image, Unstoppable).unwrap();
    let data = &bmp.bytes().unwrap()[54..];
    assert_eq!(data.len(), 4 * 16);
    for row in data.chunks_exact(16) {
        assert!(row[..15].iter().all(|&b| b == 0xFF));
        assert_eq!(row[15], 0);
    }
}

#[test]
fn offset_depends_only_on_palette() {
    let gray = vec![0u8; 3];
    let color = vec![0u8; 9];
    let gray_bmp = encode_bmp(
        &PixelImage::new(&gray, 3, 1, ChannelLayout::Mono8),
        Unstoppable,
    )
    .unwrap();
    let color_bmp = encode_bmp(
        &PixelImage::new(&color, 3, 1, ChannelLayout::Rgb24),
        Unstoppable,
    )
    .unwrap();
    assert_eq!(&gray_bmp.bytes().unwrap()[10..14], &1078u32.to_le_bytes());
    assert_eq!(&color_bmp.bytes().unwrap()[10..14], &54u32.to_le_bytes());
}

// ── Roundtrips ──────────────────────────────────────────────────────

#[test]
fn checkerboard_rgb_roundtrip() {
    let pixels = checkerboard(7, 5, 3);
    let image = PixelImage::new(&pixels, 7, 5, ChannelLayout::Rgb24);
    let bmp = encode_bmp(&image, Unstoppable).unwrap();
    let decoded = decode_bmp(bmp.bytes().unwrap(), Unstoppable).unwrap();
    assert_eq!(decoded.layout, ChannelLayout::Bgr24);
    assert_eq!(decoded.pixels(), &swap_rb(&pixels)[..]);
}

#[test]
fn noise_bgr_roundtrip_aligned_is_zero_copy() {
    let pixels = noise_pattern(8, 6, 3);
    let image = PixelImage::new(&pixels, 8, 6, ChannelLayout::Bgr24);
    let bmp = encode_bmp(&image, Unstoppable).unwrap();
    let decoded = decode_bmp(bmp.bytes().unwrap(), Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert!(decoded.is_borrowed());
}

#[test]
fn noise_gray_roundtrip_padded() {
    let pixels = noise_pattern(13, 17, 1);
    let image = PixelImage::new(&pixels, 13, 17, ChannelLayout::Mono8);
    let bmp = encode_bmp(&image, Unstoppable).unwrap();
    let decoded = decode_bmp(bmp.bytes().unwrap(), Unstoppable).unwrap();
    assert_eq!(decoded.width, 13);
    assert_eq!(decoded.height, 17);
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert!(!decoded.is_borrowed());
}

#[test]
fn tall_image_crosses_stop_check_interval() {
    let pixels = noise_pattern(3, 40, 3);
    let image = PixelImage::new(&pixels, 3, 40, ChannelLayout::Rgb24);
    let bmp = encode_bmp(&image, Unstoppable).unwrap();
    let decoded = decode_bmp(bmp.bytes().unwrap(), Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &swap_rb(&pixels)[..]);
}

// ── Hand-built files ────────────────────────────────────────────────

/// Re-store an encoded top-down bitmap bottom-up.
fn flip_to_bottom_up(bmp: &EncodedBitmap) -> Vec<u8> {
    let bytes = bmp.bytes().unwrap();
    let mut header = bmp.header().unwrap();
    let stride = header.row_stride().unwrap();
    let offset = header.pixel_data_offset as usize;
    header.height = -header.height;

    let mut out = Vec::with_capacity(bytes.len());
    header.write_le(&mut out);
    out.extend_from_slice(&bytes[54..offset]);
    for row in bytes[offset..].chunks_exact(stride).rev() {
        out.extend_from_slice(row);
    }
    out
}

#[test]
fn bottom_up_file_decodes_top_down() {
    let pixels = checkerboard(5, 3, 3);
    let image = PixelImage::new(&pixels, 5, 3, ChannelLayout::Bgr24);
    let bmp = encode_bmp(&image, Unstoppable).unwrap();
    let flipped = flip_to_bottom_up(&bmp);
    assert!(!BitmapHeader::parse(&flipped).unwrap().is_top_down());

    let decoded = decode_bmp(&flipped, Unstoppable).unwrap();
    assert_eq!(decoded.height, 3);
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn inverted_palette_is_applied() {
    let pixels = vec![0u8, 10, 200, 255];
    let image = PixelImage::new(&pixels, 4, 1, ChannelLayout::Mono8);
    let mut bytes = encode_bmp(&image, Unstoppable)
        .unwrap()
        .into_bytes()
        .unwrap();
    for i in 0..256usize {
        let v = 255 - i as u8;
        bytes[54 + i * 4..54 + i * 4 + 3].copy_from_slice(&[v, v, v]);
    }
    let decoded = decode_bmp(&bytes, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &[255, 245, 55, 0]);
    assert!(!decoded.is_borrowed());
}

#[test]
fn color_palette_rejected() {
    let pixels = vec![0u8; 4];
    let image = PixelImage::new(&pixels, 4, 1, ChannelLayout::Mono8);
    let mut bytes = encode_bmp(&image, Unstoppable)
        .unwrap()
        .into_bytes()
        .unwrap();
    bytes[54 + 4 * 7] = 0x80; // blue of entry 7
    assert!(matches!(
        decode_bmp(&bytes, Unstoppable),
        Err(BitmapError::UnsupportedVariant(_))
    ));
}

#[test]
fn short_palette_index_out_of_range() {
    let pixels = vec![0u8, 1, 2, 3];
    let image = PixelImage::new(&pixels, 4, 1, ChannelLayout::Mono8);
    let mut bytes = encode_bmp(&image, Unstoppable)
        .unwrap()
        .into_bytes()
        .unwrap();
    // Claim only 2 palette entries; index 2 and 3 now dangle.
    bytes[46..50].copy_from_slice(&2u32.to_le_bytes());
    assert!(matches!(
        decode_bmp(&bytes, Unstoppable),
        Err(BitmapError::InvalidData(_))
    ));
}

#[test]
fn compressed_and_other_depths_rejected() {
    let pixels = vec![0u8; 12];
    let image = PixelImage::new(&pixels, 4, 1, ChannelLayout::Bgr24);
    let bytes = encode_bmp(&image, Unstoppable)
        .unwrap()
        .into_bytes()
        .unwrap();

    let mut rle = bytes.clone();
    rle[30..34].copy_from_slice(&1u32.to_le_bytes());
    assert!(matches!(
        decode_bmp(&rle, Unstoppable),
        Err(BitmapError::UnsupportedVariant(_))
    ));

    let mut bpp32 = bytes.clone();
    bpp32[28..30].copy_from_slice(&32u16.to_le_bytes());
    assert!(matches!(
        decode_bmp(&bpp32, Unstoppable),
        Err(BitmapError::UnsupportedVariant(_))
    ));

    let mut planes = bytes;
    planes[26..28].copy_from_slice(&2u16.to_le_bytes());
    assert!(matches!(
        decode_bmp(&planes, Unstoppable),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn truncated_pixel_data() {
    let pixels = noise_pattern(4, 4, 3);
    let image = PixelImage::new(&pixels, 4, 4, ChannelLayout::Bgr24);
    let bytes = encode_bmp(&image, Unstoppable)
        .unwrap()
        .into_bytes()
        .unwrap();
    assert!(matches!(
        decode_bmp(&bytes[..bytes.len() - 1], Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
}

#[test]
fn garbage_input() {
    assert!(matches!(
        decode_bmp(b"P6\n1 1\n255\n", Unstoppable),
        Err(BitmapError::UnrecognizedFormat)
    ));
    assert!(matches!(
        decode_bmp(b"", Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
    assert!(matches!(
        decode_bmp(b"BM\x00\x00", Unstoppable),
        Err(BitmapError::UnexpectedEof)
    ));
}
