use crate::error::BitmapError;

/// Caps on frame size applied before any output buffer is allocated.
///
/// Every field defaults to `None` (no cap). Encoding and decoding both
/// take an `Option<&Limits>`; passing `None` skips the check entirely.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size of the output buffer: the encoded file on encode, the
    /// unpadded pixels on decode.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a `width` x `height` frame that needs `output_bytes` of
    /// output against `limits`. The first exceeded cap is reported.
    pub(crate) fn check_frame(
        limits: Option<&Self>,
        width: u32,
        height: u32,
        output_bytes: usize,
    ) -> Result<(), BitmapError> {
        let Some(limits) = limits else {
            return Ok(());
        };
        let caps = [
            ("width", u64::from(width), limits.max_width),
            ("height", u64::from(height), limits.max_height),
            (
                "pixel count",
                u64::from(width) * u64::from(height),
                limits.max_pixels,
            ),
            ("output size", output_bytes as u64, limits.max_memory_bytes),
        ];
        for (what, value, cap) in caps {
            if let Some(max) = cap.filter(|&max| value > max) {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "{what} {value} exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }
}
