#![no_main]
use framebmp::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte picks the layout, second the width; the rest is the frame
    let [selector, width, pixels @ ..] = data else {
        return;
    };
    let layout = match selector % 3 {
        0 => ChannelLayout::Mono8,
        1 => ChannelLayout::Rgb24,
        _ => ChannelLayout::Bgr24,
    };
    let width = u32::from(*width).max(1);
    let row_bytes = width as usize * layout.bytes_per_pixel();
    let height = pixels.len() / row_bytes;
    if height == 0 {
        return;
    }
    let frame = &pixels[..row_bytes * height];
    let image = PixelImage::new(frame, width, height as u32, layout);

    let Ok(bmp) = encode_bmp(&image, enough::Unstoppable) else {
        panic!("valid frame failed to encode");
    };
    let bytes = bmp.bytes().expect("fresh bitmap has bytes");
    let Ok(decoded) = decode_bmp(bytes, enough::Unstoppable) else {
        panic!("encoded bitmap failed to decode");
    };

    assert_eq!(decoded.width, width);
    assert_eq!(decoded.height, height as u32);
    assert_eq!(decoded.layout, bmp.layout());
    if layout == ChannelLayout::Rgb24 {
        let swapped: Vec<u8> = frame
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect();
        assert_eq!(decoded.pixels(), &swapped[..], "roundtrip pixel mismatch");
    } else {
        assert_eq!(decoded.pixels(), frame, "roundtrip pixel mismatch");
    }
});
