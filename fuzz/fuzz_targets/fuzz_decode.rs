#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = framebmp::BitmapHeader::parse(data);
    let _ = framebmp::decode_bmp(data, enough::Unstoppable);
});
