#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Top-down 1x1 24-bit, as written by the encoder
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&(-1i32).to_le_bytes()); // height (top-down)
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&3u32.to_le_bytes()); // image size (unpadded)
    bmp[54] = 0x1e; bmp[55] = 0x14; bmp[56] = 0x0a; // BGR
    fs::write(format!("{dir}/bgr24_1x1.bmp"), &bmp).unwrap();

    // Bottom-up variant of the same file
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes());
    fs::write(format!("{dir}/bgr24_1x1_bottom_up.bmp"), &bmp).unwrap();

    // 2x2 8-bit grayscale with ramp palette
    let mut gray = vec![0u8; 1086];
    gray[0] = b'B'; gray[1] = b'M';
    gray[2..6].copy_from_slice(&1086u32.to_le_bytes());
    gray[10..14].copy_from_slice(&1078u32.to_le_bytes());
    gray[14..18].copy_from_slice(&40u32.to_le_bytes());
    gray[18..22].copy_from_slice(&2i32.to_le_bytes());
    gray[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    gray[26..28].copy_from_slice(&1u16.to_le_bytes());
    gray[28..30].copy_from_slice(&8u16.to_le_bytes());
    gray[34..38].copy_from_slice(&4u32.to_le_bytes());
    gray[46..50].copy_from_slice(&256u32.to_le_bytes());
    gray[50..54].copy_from_slice(&256u32.to_le_bytes());
    for i in 0..256usize {
        let v = i as u8;
        gray[54 + i * 4..54 + i * 4 + 3].copy_from_slice(&[v, v, v]);
    }
    gray[1078..].copy_from_slice(&[1, 2, 0, 0, 3, 4, 0, 0]);
    fs::write(format!("{dir}/mono8_2x2.bmp"), gray).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/header_only.bin"), &bmp[..54]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
